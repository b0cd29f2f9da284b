// src/core/scanner/http_fetcher.rs

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::core::error::FetchError;
use reqwest::header::HeaderMap;
use url::Url;

/// The single page every content-level probe works from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub headers: HeaderMap,
    pub body: String,
    /// Wall-clock time from sending the request to having the full body.
    pub latency_ms: u64,
}

/// Fetches the target page once.
///
/// Certificate verification is off here: the TLS probe already judges the
/// certificate, and a bad one must not also make the page unreachable.
pub async fn fetch_page(url: &Url, config: &ScannerConfig) -> Result<FetchedPage, FetchError> {
    info!(url = %url, "Fetching target page.");

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.http_timeout)
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(FetchError::Client)?;

    let started = Instant::now();
    let response = client.get(url.clone()).send().await.map_err(|e| {
        warn!(url = %url, error = %e, "HTTP request failed.");
        FetchError::Request(e)
    })?;

    let status = response.status();
    let headers = response.headers().clone();
    debug!(%status, header_count = headers.len(), "Received HTTP response.");

    let body = response.text().await.map_err(|e| {
        warn!(url = %url, error = %e, "Failed to read response body.");
        FetchError::Body(e)
    })?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    info!(%status, latency_ms, bytes = body.len(), "Target page fetched.");
    Ok(FetchedPage { headers, body, latency_ms })
}
