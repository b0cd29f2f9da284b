//! The static catalogue of everything the assessment can report.
//!
//! Each finding carries its user-facing wording and the weight it adds to the
//! risk score. The security header audit is driven entirely by
//! [`SECURITY_HEADERS`]: adding a row adds a check.

use crate::core::models::{Finding, Severity};

/// Everything needed to record one kind of finding.
#[derive(Debug)]
pub struct FindingDetail {
    pub title: &'static str,
    pub severity: Severity,
    /// Points added to the raw risk score.
    pub weight: u32,
    /// Plain-language explanation for non-experts.
    pub layman: &'static str,
    /// Remediation advice.
    pub tech_fix: &'static str,
}

impl FindingDetail {
    pub fn to_finding(&self) -> Finding {
        Finding {
            title: self.title.to_string(),
            severity: self.severity,
            layman_explanation: self.layman.to_string(),
            technical_fix: self.tech_fix.to_string(),
        }
    }

    /// Same finding with a situation-specific explanation.
    pub fn to_finding_with_layman(&self, layman: String) -> Finding {
        Finding { layman_explanation: layman, ..self.to_finding() }
    }
}

// --- SSL/TLS ---
pub static SSL_EXPIRED: FindingDetail = FindingDetail {
    title: "SSL Certificate Expired",
    severity: Severity::Critical,
    weight: 45,
    layman: "The site's security certificate has expired.",
    tech_fix: "Renew SSL certificate immediately.",
};

pub static SSL_EXPIRING_SOON: FindingDetail = FindingDetail {
    title: "SSL Expiring Soon",
    severity: Severity::Medium,
    weight: 20,
    layman: "The site's security certificate expires soon.",
    tech_fix: "Plan renewal process.",
};

pub static SSL_INVALID: FindingDetail = FindingDetail {
    title: "No Valid SSL",
    severity: Severity::Critical,
    weight: 40,
    layman: "Connection is not private or host unreachable.",
    tech_fix: "Install a valid SSL Certificate.",
};

// --- Page content ---
pub static CONTENT_INSECURE_FORM: FindingDetail = FindingDetail {
    title: "Insecure Login Form",
    severity: Severity::High,
    weight: 20,
    layman: "Sends data over HTTP.",
    tech_fix: "Use HTTPS for form actions.",
};

pub static CONTENT_EMAIL_EXPOSURE: FindingDetail = FindingDetail {
    title: "Email Exposure",
    severity: Severity::Low,
    weight: 5,
    layman: "Emails visible to spammers.",
    tech_fix: "Obfuscate emails.",
};

/// One row of the header audit table.
#[derive(Debug)]
pub struct SecurityHeaderCheck {
    /// Canonical header name. Matching is case-insensitive.
    pub name: &'static str,
    /// The attack the header mitigates.
    pub risk: &'static str,
    pub weight: u32,
    pub severity: Severity,
}

impl SecurityHeaderCheck {
    pub fn missing_finding(&self) -> Finding {
        Finding {
            title: format!("Missing {}", self.name),
            severity: self.severity,
            layman_explanation: format!("Vulnerable to {}.", self.risk),
            technical_fix: format!("Add '{}' header.", self.name),
        }
    }

    pub fn good_practice(&self) -> String {
        format!("Header {} found.", self.name)
    }
}

pub static SECURITY_HEADERS: &[SecurityHeaderCheck] = &[
    SecurityHeaderCheck { name: "X-Frame-Options", risk: "Clickjacking", weight: 10, severity: Severity::Medium },
    SecurityHeaderCheck { name: "Content-Security-Policy", risk: "XSS Attacks", weight: 15, severity: Severity::Medium },
    SecurityHeaderCheck { name: "Strict-Transport-Security", risk: "MITM Attacks", weight: 10, severity: Severity::Low },
    SecurityHeaderCheck { name: "X-Content-Type-Options", risk: "MIME Sniffing", weight: 5, severity: Severity::Low },
];
