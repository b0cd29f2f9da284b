// src/core/normalizer.rs

use tracing::debug;
use url::{Host, Url};

use crate::core::error::AssessError;

/// A user-supplied target after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The scheme-qualified input, as it appears in the report.
    raw: String,
    url: Url,
    /// Bare host: no port, no IPv6 brackets.
    host: String,
}

impl Target {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Trims the input, defaults the scheme to `https://` and extracts the host.
pub fn normalize(input: &str) -> Result<Target, AssessError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AssessError::Validation("empty target".to_string()));
    }

    let raw = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(AssessError::Validation(format!("unsupported scheme in '{}'", trimmed)));
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&raw).map_err(|e| AssessError::Validation(format!("'{}': {}", raw, e)))?;
    let host = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        _ => return Err(AssessError::Validation(format!("'{}' has no host", raw))),
    };

    debug!(target = %raw, host = %host, "Target normalized.");
    Ok(Target { raw, url, host })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        let target = normalize("  example.com ").unwrap();
        assert_eq!(target.as_str(), "https://example.com");
        assert_eq!(target.host(), "example.com");
        assert_eq!(target.url().scheme(), "https");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let target = normalize("http://example.com/login").unwrap();
        assert_eq!(target.as_str(), "http://example.com/login");
        assert_eq!(target.url().scheme(), "http");
        assert_eq!(target.host(), "example.com");
    }

    #[test]
    fn port_is_not_part_of_host() {
        let target = normalize("example.com:8443").unwrap();
        assert_eq!(target.host(), "example.com");
        assert_eq!(target.url().port(), Some(8443));
    }

    #[test]
    fn ipv6_host_loses_brackets() {
        let target = normalize("http://[::1]:8080/").unwrap();
        assert_eq!(target.host(), "::1");
    }

    #[test]
    fn empty_and_blank_inputs_are_rejected() {
        assert!(matches!(normalize(""), Err(AssessError::Validation(_))));
        assert!(matches!(normalize("   \t"), Err(AssessError::Validation(_))));
    }

    #[test]
    fn foreign_scheme_is_rejected() {
        assert!(matches!(normalize("ftp://example.com"), Err(AssessError::Validation(_))));
    }

    #[test]
    fn unparsable_host_is_rejected() {
        assert!(matches!(normalize("exa mple.com"), Err(AssessError::Validation(_))));
    }
}
