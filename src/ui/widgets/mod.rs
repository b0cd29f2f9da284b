// src/ui/widgets/mod.rs

pub mod analysis_view;    // Findings list with layman/fix details.
pub mod disclaimer_popup; // Shown once at startup.
pub mod footer;           // Key hints and export status.
pub mod input;            // Target URL input.
pub mod summary;          // Grade, score gauge, stats and server info.
