// src/core/scanner/headers_scanner.rs

use tracing::{debug, info, warn};
use crate::core::knowledge_base::{SecurityHeaderCheck, SECURITY_HEADERS};
use crate::core::report_builder::ReportBuilder;
use reqwest::header::HeaderMap;

/// Looks up a header and returns its value, if present.
///
/// `HeaderMap` normalizes names, so `"X-Frame-Options"` and
/// `"x-frame-options"` find the same entry. Non-UTF-8 values still count as
/// present.
fn check_header(headers: &HeaderMap, name: &str) -> Option<String> {
    debug!(header_name = name, "Checking for header.");
    let value = headers.get(name)?;
    match value.to_str() {
        Ok(s) => {
            debug!(header_name = name, value = s, "Header found.");
            Some(s.to_string())
        }
        Err(_) => {
            warn!(header_name = name, "Header found but contained invalid UTF-8.");
            Some("[Invalid UTF-8]".to_string())
        }
    }
}

/// Runs the security header table against a response.
pub fn audit_headers(headers: &HeaderMap, report: &mut ReportBuilder) {
    audit_headers_with(headers, SECURITY_HEADERS, report);
}

/// Each row yields either a good practice (present) or a weighted finding (absent).
pub fn audit_headers_with(headers: &HeaderMap, checks: &[SecurityHeaderCheck], report: &mut ReportBuilder) {
    info!(checks = checks.len(), "Starting headers audit.");
    let mut missing = 0;

    for check in checks {
        match check_header(headers, check.name) {
            Some(_) => report.add_good_practice(check.good_practice()),
            None => {
                missing += 1;
                report.add_finding(check.missing_finding(), check.weight);
            }
        }
    }

    info!(missing, "Headers audit finished.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Severity;
    use reqwest::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(HeaderName::from_static(*name), HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn all_missing_costs_forty_points() {
        let mut report = ReportBuilder::new("https://example.com");
        audit_headers(&HeaderMap::new(), &mut report);

        assert_eq!(report.raw_score(), 40);
        assert_eq!(report.vulnerabilities().len(), 4);
        assert!(report.good_practices().is_empty());
        assert_eq!(report.stats().medium, 2);
        assert_eq!(report.stats().low, 2);
    }

    #[test]
    fn all_present_are_good_practices() {
        let mut report = ReportBuilder::new("https://example.com");
        let map = headers(&[
            ("x-frame-options", "DENY"),
            ("content-security-policy", "default-src 'self'"),
            ("strict-transport-security", "max-age=31536000"),
            ("x-content-type-options", "nosniff"),
        ]);
        audit_headers(&map, &mut report);

        assert_eq!(report.raw_score(), 0);
        assert!(report.vulnerabilities().is_empty());
        assert_eq!(report.stats().safe, 4);
        assert!(report.good_practices().contains(&"Header Content-Security-Policy found.".to_string()));
    }

    #[test]
    fn partial_headers_only_charge_for_missing_ones() {
        let mut report = ReportBuilder::new("https://example.com");
        audit_headers(&headers(&[("content-security-policy", "default-src 'self'")]), &mut report);

        assert_eq!(report.raw_score(), 25);
        let titles: Vec<_> = report.vulnerabilities().iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Missing X-Frame-Options", "Missing Strict-Transport-Security", "Missing X-Content-Type-Options"]
        );
    }

    #[test]
    fn lookup_ignores_name_case() {
        let map = headers(&[("x-frame-options", "SAMEORIGIN")]);
        assert_eq!(check_header(&map, "X-Frame-Options").as_deref(), Some("SAMEORIGIN"));
        assert_eq!(check_header(&map, "X-FRAME-OPTIONS").as_deref(), Some("SAMEORIGIN"));
    }

    #[test]
    fn custom_tables_drive_the_audit() {
        let table = [SecurityHeaderCheck { name: "Referrer-Policy", risk: "Referrer Leakage", weight: 3, severity: Severity::Low }];
        let mut report = ReportBuilder::new("https://example.com");
        audit_headers_with(&HeaderMap::new(), &table, &mut report);

        assert_eq!(report.raw_score(), 3);
        assert_eq!(report.vulnerabilities()[0].title, "Missing Referrer-Policy");
    }
}
