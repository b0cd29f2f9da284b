// src/core/scanner/ssl_scanner.rs

use tracing::{debug, error, info, warn};

use crate::config::ScannerConfig;
use crate::core::error::SslError;
use crate::core::knowledge_base::{SSL_EXPIRED, SSL_EXPIRING_SOON, SSL_INVALID};
use crate::core::models::SslStatus;
use crate::core::report_builder::ReportBuilder;
use chrono::{DateTime, Utc};
use native_tls::TlsConnector;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tokio::task::spawn_blocking;
use x509_parser::prelude::*;

/// Certificates with fewer days left than this are flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// What we read off the peer certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateData {
    pub subject_name: String,
    pub issuer_name: String,
    pub days_until_expiry: i64,
}

/// Expiry classification of a certificate that was read successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateHealth {
    Expired { days_ago: i64 },
    ExpiringSoon { days_left: i64 },
    Healthy { days_left: i64 },
}

/// Opens a verified TLS connection to the host and reads its certificate.
///
/// The blocking handshake runs on the blocking pool. The whole inspection is
/// bounded by `tls_timeout`, on top of the socket-level timeouts.
pub async fn run_ssl_scan(host: &str, config: &ScannerConfig) -> Result<CertificateData, SslError> {
    info!(host, port = config.tls_port, "Starting SSL/TLS scan.");
    let host_owned = host.to_string();
    let port = config.tls_port;
    let timeout = config.tls_timeout;

    debug!("Spawning blocking task for TLS connection.");
    let task = spawn_blocking(move || perform_tls_scan(&host_owned, port, timeout));
    let result = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            error!(panic = %e, "Blocking SSL scan task panicked!");
            Err(SslError::TaskPanicked(e.to_string()))
        }
        Err(_) => {
            warn!(host, ?timeout, "SSL/TLS scan timed out.");
            Err(SslError::Timeout(timeout))
        }
    };

    match &result {
        Ok(cert) => info!(days_left = cert.days_until_expiry, "SSL/TLS scan finished."),
        Err(e) => warn!(error = %e, "SSL/TLS scan failed."),
    }
    result
}

fn perform_tls_scan(host: &str, port: u16, timeout: Duration) -> Result<CertificateData, SslError> {
    debug!(host, "Performing TLS connection and handshake.");

    let connector = TlsConnector::new().map_err(|e| {
        error!(error = %e, "Failed to create TlsConnector");
        SslError::Connector(e.to_string())
    })?;

    debug!(host, port, "Connecting TCP stream.");
    let stream = connect_with_timeout(host, port, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    debug!(host, "Performing TLS handshake.");
    let stream = connector.connect(host, stream).map_err(|e| {
        debug!(error = %e, "TLS handshake failed");
        SslError::Handshake(e.to_string())
    })?;

    let cert = match stream.peer_certificate() {
        Ok(Some(c)) => c,
        Ok(None) => return Err(SslError::NoCertificate),
        Err(e) => return Err(SslError::Handshake(format!("could not read peer certificate: {}", e))),
    };

    let cert_der = cert
        .to_der()
        .map_err(|e| SslError::Parse(format!("could not convert certificate to DER: {}", e)))?;

    let (_, x509) = parse_x509_certificate(&cert_der).map_err(|e| {
        error!(error = %e, "Failed to parse X.509 certificate");
        SslError::Parse(e.to_string())
    })?;

    info!(subject = %x509.subject(), issuer = %x509.issuer(), "Successfully parsed certificate.");

    let not_after = asn1_time_to_chrono_utc(&x509.validity().not_after);

    Ok(CertificateData {
        subject_name: x509.subject().to_string(),
        issuer_name: x509.issuer().to_string(),
        days_until_expiry: days_until(not_after, Utc::now()),
    })
}

fn connect_with_timeout(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, SslError> {
    let mut last_error = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "TCP connection attempt failed.");
                last_error = Some(e);
            }
        }
    }
    Err(SslError::Connect(last_error.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
    })))
}

fn asn1_time_to_chrono_utc(time: &ASN1Time) -> DateTime<Utc> {
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or_default()
}

/// Whole days from `now` until `not_after`, rounded toward the past, so a
/// certificate that expired an hour ago is at -1.
pub fn days_until(not_after: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    not_after.signed_duration_since(now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

pub fn classify_expiry(days_left: i64) -> CertificateHealth {
    if days_left < 0 {
        CertificateHealth::Expired { days_ago: -days_left }
    } else if days_left < EXPIRY_WARNING_DAYS {
        CertificateHealth::ExpiringSoon { days_left }
    } else {
        CertificateHealth::Healthy { days_left }
    }
}

/// Turns the TLS probe result into exactly one finding or good practice.
pub fn record_ssl_results(result: &Result<CertificateData, SslError>, report: &mut ReportBuilder) {
    let cert = match result {
        Ok(cert) => cert,
        Err(e) => {
            debug!(error = %e, "No valid certificate, adding SSL_INVALID finding.");
            let info = report.server_info_mut();
            info.ssl_status = SslStatus::Invalid;
            info.ssl_expiry_days = None;
            report.add_detail(&SSL_INVALID);
            return;
        }
    };

    let days = cert.days_until_expiry;
    let info = report.server_info_mut();
    info.ssl_expiry_days = Some(days);
    info.ssl_subject = Some(cert.subject_name.clone());
    info.ssl_issuer = Some(cert.issuer_name.clone());

    match classify_expiry(days) {
        CertificateHealth::Expired { days_ago } => {
            report.server_info_mut().ssl_status = SslStatus::Expired;
            report.add_finding(
                SSL_EXPIRED.to_finding_with_layman(format!("Expired {} days ago.", days_ago)),
                SSL_EXPIRED.weight,
            );
        }
        CertificateHealth::ExpiringSoon { days_left } => {
            report.server_info_mut().ssl_status = SslStatus::Expiring;
            report.add_finding(
                SSL_EXPIRING_SOON.to_finding_with_layman(format!("Certificate expires in {} days.", days_left)),
                SSL_EXPIRING_SOON.weight,
            );
        }
        CertificateHealth::Healthy { days_left } => {
            report.server_info_mut().ssl_status = SslStatus::Valid;
            report.add_good_practice(format!("Valid SSL (Expires in {} days).", days_left));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Severity;
    use chrono::TimeZone;

    fn cert_with_days(days: i64) -> CertificateData {
        CertificateData {
            subject_name: "CN=example.com".into(),
            issuer_name: "CN=Test CA".into(),
            days_until_expiry: days,
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify_expiry(-1), CertificateHealth::Expired { days_ago: 1 });
        assert_eq!(classify_expiry(0), CertificateHealth::ExpiringSoon { days_left: 0 });
        assert_eq!(classify_expiry(29), CertificateHealth::ExpiringSoon { days_left: 29 });
        assert_eq!(classify_expiry(30), CertificateHealth::Healthy { days_left: 30 });
    }

    #[test]
    fn days_until_rounds_toward_the_past() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(days_until(now - chrono::Duration::hours(1), now), -1);
        assert_eq!(days_until(now + chrono::Duration::hours(23), now), 0);
        assert_eq!(days_until(now + chrono::Duration::days(45), now), 45);
        assert_eq!(days_until(now - chrono::Duration::days(5), now), -5);
    }

    #[test]
    fn expired_certificate_is_critical() {
        let mut report = ReportBuilder::new("https://example.com");
        record_ssl_results(&Ok(cert_with_days(-5)), &mut report);

        assert_eq!(report.raw_score(), 45);
        let report = report.finalize();
        let finding = report.find("SSL Certificate Expired").unwrap();
        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.layman_explanation, "Expired 5 days ago.");
        assert_eq!(report.server_info().ssl_status, SslStatus::Expired);
        assert_eq!(report.server_info().ssl_expiry_days, Some(-5));
    }

    #[test]
    fn expiring_certificate_is_medium() {
        let mut report = ReportBuilder::new("https://example.com");
        record_ssl_results(&Ok(cert_with_days(12)), &mut report);

        assert_eq!(report.raw_score(), 20);
        assert_eq!(report.stats().medium, 1);
        let report = report.finalize();
        assert_eq!(report.find("SSL Expiring Soon").unwrap().severity, Severity::Medium);
        assert_eq!(report.server_info().ssl_status, SslStatus::Expiring);
    }

    #[test]
    fn healthy_certificate_is_a_good_practice() {
        let mut report = ReportBuilder::new("https://example.com");
        record_ssl_results(&Ok(cert_with_days(200)), &mut report);

        assert_eq!(report.raw_score(), 0);
        assert_eq!(report.good_practices(), ["Valid SSL (Expires in 200 days)."]);
        assert_eq!(report.stats().safe, 1);
        let report = report.finalize();
        assert_eq!(report.server_info().ssl_status, SslStatus::Valid);
        assert_eq!(report.server_info().ssl_subject.as_deref(), Some("CN=example.com"));
        assert_eq!(report.server_info().ssl_issuer.as_deref(), Some("CN=Test CA"));
    }

    #[test]
    fn failure_is_no_valid_ssl() {
        let mut report = ReportBuilder::new("https://example.com");
        record_ssl_results(&Err(SslError::Handshake("unknown issuer".into())), &mut report);

        assert_eq!(report.raw_score(), 40);
        let report = report.finalize();
        assert_eq!(report.find("No Valid SSL").unwrap().severity, Severity::Critical);
        assert_eq!(report.server_info().ssl_status, SslStatus::Invalid);
        assert_eq!(report.server_info().ssl_expiry_days, None);
        assert_eq!(report.server_info().ssl_expiry_display(), "Invalid");
        assert_eq!(report.server_info().ssl_issuer, None);
    }

    #[test]
    fn recording_is_idempotent_across_reports() {
        let cert = Ok(cert_with_days(-5));
        let mut first = ReportBuilder::new("https://example.com");
        let mut second = ReportBuilder::new("https://example.com");
        record_ssl_results(&cert, &mut first);
        record_ssl_results(&cert, &mut second);

        assert_eq!(first.raw_score(), second.raw_score());
        assert_eq!(first.vulnerabilities(), second.vulnerabilities());
        assert_eq!(first.stats(), second.stats());
    }

    #[tokio::test]
    async fn refused_connection_is_a_probe_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ScannerConfig { tls_port: port, tls_timeout: Duration::from_secs(2), ..ScannerConfig::default() };
        let result = run_ssl_scan("127.0.0.1", &config).await;
        assert!(matches!(result, Err(SslError::Connect(_))));
    }
}
