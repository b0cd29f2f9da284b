use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use vanguard_rs_assessor::config::ScannerConfig;
use vanguard_rs_assessor::core::error::AssessError;
use vanguard_rs_assessor::core::models::{AssessResponse, ErrorResult, Grade, Severity, SslStatus};
use vanguard_rs_assessor::core::{assess_site_response, assess_site_with};

const SECURE_HEADERS: &str = "X-Frame-Options: DENY\r\n\
Content-Security-Policy: default-src 'self'\r\n\
Strict-Transport-Security: max-age=31536000\r\n\
X-Content-Type-Options: nosniff\r\n";

/// Serves the same canned response to every connection.
async fn spawn_http_server(extra_headers: &str, body: &str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
        body.len(),
        extra_headers,
        body
    );

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            let response = response.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// A port nothing listens on.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Keeps every probe on the loopback interface.
fn local_config() -> ScannerConfig {
    ScannerConfig {
        geolocation_enabled: false,
        tls_port: closed_port(),
        tls_timeout: Duration::from_secs(2),
        http_timeout: Duration::from_secs(5),
        ..ScannerConfig::default()
    }
}

#[tokio::test]
async fn missing_headers_cost_forty_points() {
    let addr = spawn_http_server("", "<html><body><h1>Hello</h1></body></html>").await;
    let url = format!("http://{}/", addr);

    let report = assess_site_with(&url, &local_config()).await.unwrap();

    let header_findings: Vec<_> = report
        .vulnerabilities()
        .iter()
        .filter(|f| f.title.starts_with("Missing "))
        .collect();
    assert_eq!(header_findings.len(), 4);
    assert!(report.good_practices().iter().all(|p| !p.starts_with("Header ")));

    // Nothing listens on the TLS port, so the certificate check fails too: 40 + 40.
    assert!(report.find("No Valid SSL").is_some());
    assert_eq!(report.risk_score(), 80);
    assert_eq!(report.grade(), Grade::F);
    assert_eq!(report.server_info().ssl_status, SslStatus::Invalid);
    assert_eq!(report.server_info().ip_display(), "127.0.0.1");
    assert_eq!(report.server_info().location_display(), "Unknown");

    let stats = report.stats();
    assert_eq!(stats.total() as usize, report.vulnerabilities().len() + report.good_practices().len());
}

#[tokio::test]
async fn hardened_page_only_pays_for_tls() {
    let addr = spawn_http_server(SECURE_HEADERS, "<html><body>Nothing to see.</body></html>").await;
    let url = format!("http://{}/", addr);

    let report = assess_site_with(&url, &local_config()).await.unwrap();

    assert_eq!(report.vulnerabilities().len(), 1);
    assert_eq!(report.vulnerabilities()[0].title, "No Valid SSL");
    assert_eq!(report.good_practices().len(), 4);
    assert_eq!(report.stats().safe, 4);
    assert_eq!(report.risk_score(), 40);
    assert_eq!(report.grade(), Grade::C);
}

#[tokio::test]
async fn insecure_forms_are_reported_once() {
    let body = r#"<html><body>
        <form action="http://example.test/login" method="post"><input name="u"></form>
        <form action="http://example.test/register" method="post"><input name="u"></form>
    </body></html>"#;
    let addr = spawn_http_server(SECURE_HEADERS, body).await;
    let url = format!("http://{}/", addr);

    let report = assess_site_with(&url, &local_config()).await.unwrap();

    let forms: Vec<_> = report
        .vulnerabilities()
        .iter()
        .filter(|f| f.title == "Insecure Login Form")
        .collect();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].severity, Severity::High);
    assert_eq!(report.risk_score(), 60);
    assert!(report.find("Email Exposure").is_none());
}

#[tokio::test]
async fn exposed_email_is_reported() {
    let addr = spawn_http_server(SECURE_HEADERS, "<p>Write to webmaster@example.test</p>").await;
    let url = format!("http://{}/", addr);

    let report = assess_site_with(&url, &local_config()).await.unwrap();

    assert_eq!(report.find("Email Exposure").unwrap().severity, Severity::Low);
    assert_eq!(report.risk_score(), 45);
    assert_eq!(report.stats().low, 1);
}

#[tokio::test]
async fn refused_fetch_yields_error_result() {
    let url = format!("http://127.0.0.1:{}/", closed_port());

    let err = assess_site_with(&url, &local_config()).await.unwrap_err();
    assert!(matches!(err, AssessError::Unreachable(_)), "{err:?}");

    let response = assess_site_response(&url, &local_config()).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "Target unreachable." }));
}

#[tokio::test]
async fn empty_input_is_a_validation_error() {
    let err = assess_site_with("   ", &local_config()).await.unwrap_err();
    assert!(matches!(err, AssessError::Validation(_)));
    assert_eq!(ErrorResult::from(&err).error, "Please provide a valid URL.");
}

#[tokio::test]
async fn report_serializes_to_wire_contract() {
    let addr = spawn_http_server(SECURE_HEADERS, "<html></html>").await;
    let url = format!("http://{}/", addr);

    let response = assess_site_response(&url, &local_config()).await;
    assert!(matches!(response, AssessResponse::Report(_)));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["target"], url);
    assert_eq!(json["grade"], "C");
    assert_eq!(json["risk_score"], 40);
    assert_eq!(json["server_info"]["ip"], "127.0.0.1");
    assert_eq!(json["server_info"]["ssl_expiry"], "Invalid");
    assert!(json["server_info"]["latency"].as_str().unwrap().ends_with("ms"));
    assert_eq!(json["vulnerabilities"][0]["tech_fix"], "Install a valid SSL Certificate.");
    for key in ["high", "medium", "low", "safe"] {
        assert!(json["stats"][key].is_u64(), "stats.{key}");
    }
}

#[tokio::test]
async fn failed_geolocation_does_not_abort_the_assessment() {
    let addr = spawn_http_server(SECURE_HEADERS, "<html></html>").await;
    let url = format!("http://{}/", addr);
    let config = ScannerConfig {
        geolocation_enabled: true,
        geolocation_endpoint: format!("http://127.0.0.1:{}/json", closed_port()),
        geolocation_timeout: Duration::from_secs(2),
        ..local_config()
    };

    let report = assess_site_with(&url, &config).await.unwrap();

    assert_eq!(report.server_info().ip_display(), "127.0.0.1");
    assert_eq!(report.server_info().location_display(), "Unknown");
    assert_eq!(report.risk_score(), 40);
    assert!(report.vulnerabilities().iter().all(|f| !f.title.contains("Geo")));
}
