// src/export.rs

use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::models::Report;
use crate::logging::get_data_dir;
use color_eyre::eyre::{Result, WrapErr};

/// Where exported reports go by default.
pub fn default_export_dir() -> PathBuf {
    get_data_dir().join("reports")
}

/// Turns a target into something safe to use in a file name.
fn file_stem(report: &Report) -> String {
    let host = report
        .target()
        .split("://")
        .last()
        .unwrap_or_default()
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let cleaned: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    let stamp = report.scan_time().format("%Y%m%d-%H%M%S");
    if cleaned.is_empty() {
        format!("report-{}", stamp)
    } else {
        format!("{}-{}", cleaned, stamp)
    }
}

/// Writes the report as pretty JSON into `dir`, creating it if needed.
pub fn export_report(report: &Report, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{}.json", file_stem(report)));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json).wrap_err_with(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Report exported.");
    Ok(path)
}
