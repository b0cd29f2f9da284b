// src/lib.rs

//! Passive security assessment of a single website.
//!
//! [`core::assess_site`] probes the target's network identity, TLS
//! certificate, HTTP security headers and page content, then grades the
//! result from A to F.

pub mod config;
pub mod core;
pub mod export;
pub mod logging;
