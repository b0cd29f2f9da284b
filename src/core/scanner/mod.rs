// src/core/scanner/mod.rs

// The probes. Each one either returns a typed result for the pipeline to
// record, or records straight into the report when it cannot fail.
pub mod content_scanner;
pub mod headers_scanner;
pub mod http_fetcher;
pub mod network_scanner;
pub mod ssl_scanner;

use tracing::{info, warn};

use crate::config::ScannerConfig;
use crate::core::error::AssessError;
use crate::core::models::{AssessResponse, ErrorResult, Report};
use crate::core::normalizer;
use crate::core::report_builder::ReportBuilder;
use self::content_scanner::analyze_content;
use self::headers_scanner::audit_headers;
use self::http_fetcher::fetch_page;
use self::network_scanner::{record_network_intel, run_network_scan};
use self::ssl_scanner::{record_ssl_results, run_ssl_scan};

/// Assesses one site with configuration taken from the environment.
pub async fn assess_site(url: &str) -> Result<Report, AssessError> {
    assess_site_with(url, &ScannerConfig::from_env()).await
}

/// Runs the full assessment pipeline against `url`.
///
/// The network probe, the TLS inspector and the page fetch are independent,
/// so they run concurrently via `tokio::join!`. Their results are recorded
/// afterwards in a fixed order, which keeps the finding order stable. A
/// failed fetch ends the assessment with `AssessError::Unreachable`; every
/// other probe failure degrades into a default field or a finding.
///
/// # Arguments
///
/// * `url` - The raw user input, e.g. "example.com" or "http://example.com/login".
/// * `config` - Timeouts, ports and endpoints for the probes.
pub async fn assess_site_with(url: &str, config: &ScannerConfig) -> Result<Report, AssessError> {
    let target = normalizer::normalize(url).inspect_err(|e| warn!(error = %e, "Rejected assessment input."))?;
    info!(target = %target.as_str(), host = %target.host(), "Starting assessment.");

    let mut report = ReportBuilder::new(target.as_str());

    let (network, ssl, page) = tokio::join!(
        run_network_scan(target.host(), config),
        run_ssl_scan(target.host(), config),
        fetch_page(target.url(), config)
    );

    record_network_intel(&network, &mut report);
    record_ssl_results(&ssl, &mut report);

    let page = page.map_err(|e| {
        warn!(target = %target.as_str(), error = %e, "Fetch failed, aborting assessment.");
        AssessError::from(e)
    })?;
    report.server_info_mut().latency_ms = page.latency_ms;

    audit_headers(&page.headers, &mut report);
    analyze_content(&page.body, &mut report);

    let report = report.finalize();
    info!(
        grade = %report.grade(),
        risk_score = report.risk_score(),
        findings = report.vulnerabilities().len(),
        "Assessment finished."
    );
    Ok(report)
}

/// Runs an assessment and folds any error into the `{"error": ...}` shape.
pub async fn assess_site_response(url: &str, config: &ScannerConfig) -> AssessResponse {
    match assess_site_with(url, config).await {
        Ok(report) => AssessResponse::Report(Box::new(report)),
        Err(e) => AssessResponse::Error(ErrorResult::from(&e)),
    }
}
