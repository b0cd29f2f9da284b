// src/core/scanner/network_scanner.rs

use std::net::IpAddr;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::core::error::{GeoError, ResolveError};
use crate::core::report_builder::ReportBuilder;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use serde::Deserialize;

/// Best-effort facts about where the target lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkIntel {
    pub ip: Option<IpAddr>,
    pub location: Option<String>,
}

/// The subset of an ip-api.com style answer we care about.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    city: Option<String>,
    country: Option<String>,
    message: Option<String>,
}

/// Resolves the host and, if that works, geolocates the address.
///
/// Never fails: each step that goes wrong just leaves its field empty.
pub async fn run_network_scan(host: &str, config: &ScannerConfig) -> NetworkIntel {
    info!(host, "Starting network intelligence scan.");
    let mut intel = NetworkIntel::default();

    let ip = match resolve_host(host, config).await {
        Ok(ip) => ip,
        Err(e) => {
            warn!(host, error = %e, "Host resolution failed.");
            return intel;
        }
    };
    intel.ip = Some(ip);

    match geolocate(ip, config).await {
        Ok(location) => intel.location = Some(location),
        Err(GeoError::Disabled) => debug!("Geolocation disabled, skipping."),
        Err(e) => warn!(%ip, error = %e, "Geolocation lookup failed."),
    }

    info!(ip = ?intel.ip, location = ?intel.location, "Network intelligence scan finished.");
    intel
}

/// Writes the gathered facts into the report. Nothing here is a finding.
pub fn record_network_intel(intel: &NetworkIntel, report: &mut ReportBuilder) {
    let info = report.server_info_mut();
    info.ip = intel.ip.map(|ip| ip.to_string());
    info.location = intel.location.clone();
}

/// Resolves `host` to one address, preferring IPv4. IP literals skip DNS.
pub async fn resolve_host(host: &str, config: &ScannerConfig) -> Result<IpAddr, ResolveError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        debug!(%ip, "Host is an IP literal, skipping DNS.");
        return Ok(ip);
    }

    let resolver = build_resolver(config);
    debug!(host, "Looking up A/AAAA records.");
    let lookup = tokio::time::timeout(config.dns_timeout, resolver.lookup_ip(host))
        .await
        .map_err(|_| ResolveError::Timeout(config.dns_timeout))?
        .map_err(|e| ResolveError::Lookup(e.to_string()))?;

    let addresses: Vec<IpAddr> = lookup.iter().collect();
    addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
        .ok_or(ResolveError::NoAddress)
}

fn build_resolver(config: &ScannerConfig) -> TokioAsyncResolver {
    let (resolver_config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            debug!(error = %e, "No usable system resolver config, using defaults.");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.timeout = config.dns_timeout;
    opts.attempts = 1;
    TokioAsyncResolver::tokio(resolver_config, opts)
}

/// Asks the geolocation service for "City, Country".
pub async fn geolocate(ip: IpAddr, config: &ScannerConfig) -> Result<String, GeoError> {
    if !config.geolocation_enabled {
        return Err(GeoError::Disabled);
    }

    let url = format!("{}/{}", config.geolocation_endpoint.trim_end_matches('/'), ip);
    debug!(url = %url, "Querying geolocation service.");
    let client = reqwest::Client::builder()
        .timeout(config.geolocation_timeout)
        .build()?;
    let response: GeoResponse = client.get(&url).send().await?.json().await?;
    format_location(response)
}

fn format_location(response: GeoResponse) -> Result<String, GeoError> {
    if response.status != "success" {
        return Err(GeoError::Rejected(
            response.message.unwrap_or(response.status),
        ));
    }
    match (response.city, response.country) {
        (Some(city), Some(country)) if !city.is_empty() && !country.is_empty() => {
            Ok(format!("{}, {}", city, country))
        }
        _ => Err(GeoError::Incomplete),
    }
}
