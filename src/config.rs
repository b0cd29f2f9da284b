// src/config.rs

use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Desktop browser user-agent sent with the page fetch.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Free IP geolocation endpoint; the IP is appended as a path segment.
pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "http://ip-api.com/json";

/// Tunables for one assessment. Every network-bound step has its own bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub dns_timeout: Duration,
    pub geolocation_enabled: bool,
    pub geolocation_endpoint: String,
    pub geolocation_timeout: Duration,
    pub tls_port: u16,
    pub tls_timeout: Duration,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(3),
            geolocation_enabled: true,
            geolocation_endpoint: DEFAULT_GEOLOCATION_ENDPOINT.to_string(),
            geolocation_timeout: Duration::from_secs(3),
            tls_port: 443,
            tls_timeout: Duration::from_secs(5),
            http_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScannerConfig {
    /// Defaults overridden by `VANGUARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unparsable values are
    /// logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var::<u64>(&lookup, "VANGUARD_DNS_TIMEOUT_SECS") {
            config.dns_timeout = Duration::from_secs(secs);
        }
        if let Some(enabled) = parse_var::<bool>(&lookup, "VANGUARD_GEO_ENABLED") {
            config.geolocation_enabled = enabled;
        }
        if let Some(endpoint) = lookup("VANGUARD_GEO_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.geolocation_endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VANGUARD_GEO_TIMEOUT_SECS") {
            config.geolocation_timeout = Duration::from_secs(secs);
        }
        if let Some(port) = parse_var::<u16>(&lookup, "VANGUARD_TLS_PORT") {
            config.tls_port = port;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VANGUARD_TLS_TIMEOUT_SECS") {
            config.tls_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VANGUARD_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("VANGUARD_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable configuration value.");
            None
        }
    }
}
