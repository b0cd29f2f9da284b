// src/core/error.rs

use std::time::Duration;
use thiserror::Error;

use crate::core::models::ErrorResult;

/// Message shown for an empty or unparsable target.
pub const VALIDATION_MESSAGE: &str = "Please provide a valid URL.";
/// Message shown when the page itself cannot be fetched.
pub const UNREACHABLE_MESSAGE: &str = "Target unreachable.";

/// Failures that end an assessment without a report.
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("invalid target: {0}")]
    Validation(String),
    #[error("target unreachable: {0}")]
    Unreachable(FetchError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FetchError> for AssessError {
    fn from(err: FetchError) -> Self {
        match err {
            // A client that cannot be built is our problem, not the target's.
            FetchError::Client(e) => AssessError::Internal(format!("HTTP client error: {}", e)),
            other => AssessError::Unreachable(other),
        }
    }
}

impl From<&AssessError> for ErrorResult {
    fn from(err: &AssessError) -> Self {
        let error = match err {
            AssessError::Validation(_) => VALIDATION_MESSAGE.to_string(),
            AssessError::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            AssessError::Internal(detail) => format!("Internal Server Error: {}", detail),
        };
        ErrorResult { error }
    }
}

impl From<AssessError> for ErrorResult {
    fn from(err: AssessError) -> Self {
        ErrorResult::from(&err)
    }
}

// --- Probe-local failures ---
// None of these leave their probe; the orchestrator turns them into defaults or findings.

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("DNS lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("DNS lookup failed: {0}")]
    Lookup(String),
    #[error("DNS lookup returned no addresses")]
    NoAddress,
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geolocation lookup disabled")]
    Disabled,
    #[error("geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("geolocation service rejected the query: {0}")]
    Rejected(String),
    #[error("geolocation response missing city or country")]
    Incomplete,
}

#[derive(Debug, Error)]
pub enum SslError {
    #[error("TlsConnector error: {0}")]
    Connector(String),
    #[error("TCP connection error: {0}")]
    Connect(#[from] std::io::Error),
    #[error("TLS inspection timed out after {0:?}")]
    Timeout(Duration),
    #[error("TLS handshake error: {0}")]
    Handshake(String),
    #[error("server did not provide a certificate")]
    NoCertificate,
    #[error("X.509 parse error: {0}")]
    Parse(String),
    #[error("TLS task panicked: {0}")]
    TaskPanicked(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),
    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_uses_short_message() {
        let result = ErrorResult::from(AssessError::Validation("empty input".into()));
        assert_eq!(result.error, VALIDATION_MESSAGE);
    }

    #[test]
    fn internal_error_keeps_detail() {
        let result = ErrorResult::from(AssessError::Internal("boom".into()));
        assert_eq!(result.error, "Internal Server Error: boom");
    }
}
