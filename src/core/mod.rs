// src/core/mod.rs

/// Data structures shared across the pipeline: `Report`, `Finding`,
/// `Severity`, `Grade` and the wire shapes.
pub mod models;

/// Typed failures, for the pipeline as a whole and for each probe.
pub mod error;

/// Static catalogue of findings and the security header table.
pub mod knowledge_base;

pub mod normalizer;

/// The accumulator every probe writes into.
pub mod report_builder;

/// Score clamping and letter grading.
pub mod grader;

/// The probes and the `assess_site` pipeline that sequences them.
pub mod scanner;

pub use scanner::{assess_site, assess_site_response, assess_site_with};
