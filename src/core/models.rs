// src/core/models.rs

use chrono::{DateTime, Local};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Format used for `scan_time` on the wire.
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder for best-effort fields that could not be determined.
pub const UNKNOWN: &str = "Unknown";

// --- Core Data Models ---

/// The severity level of a finding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// The `stats` bucket a finding of this severity is counted in.
    /// Critical and High share the `high` bucket.
    pub fn tier(self) -> StatTier {
        match self {
            Severity::Critical | Severity::High => StatTier::High,
            Severity::Medium => StatTier::Medium,
            Severity::Low => StatTier::Low,
        }
    }
}

/// The buckets of the report's `stats` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTier {
    High,
    Medium,
    Low,
    Safe,
}

/// Letter summary of the final risk score. `A` is best, `F` is worst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// A recorded negative observation, ready to be shown to a non-expert user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub title: String,
    pub severity: Severity,
    #[serde(rename = "layman")]
    pub layman_explanation: String,
    #[serde(rename = "tech_fix")]
    pub technical_fix: String,
}

/// Outcome of the TLS certificate inspection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum SslStatus {
    Valid,
    Expiring,
    Expired,
    Invalid,
    #[default]
    NotEvaluated,
}

// --- Server Info ---

/// Network and TLS facts gathered about the target.
///
/// `ip` and `location` are best-effort: `None` means the lookup failed and
/// is rendered as `"Unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub ip: Option<String>,
    pub location: Option<String>,
    pub latency_ms: u64,
    pub ssl_expiry_days: Option<i64>,
    pub ssl_status: SslStatus,
    /// Certificate subject and issuer, kept for display only.
    pub ssl_subject: Option<String>,
    pub ssl_issuer: Option<String>,
}

impl ServerInfo {
    pub fn ip_display(&self) -> &str {
        self.ip.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn location_display(&self) -> &str {
        self.location.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn latency_display(&self) -> String {
        format!("{}ms", self.latency_ms)
    }

    /// `"<n> Days"` when a certificate was read, `"Invalid"` when the TLS
    /// probe failed, `"N/A"` when it never ran.
    pub fn ssl_expiry_display(&self) -> String {
        match (self.ssl_expiry_days, self.ssl_status) {
            (Some(days), _) => format!("{} Days", days),
            (None, SslStatus::Invalid) => "Invalid".to_string(),
            (None, _) => "N/A".to_string(),
        }
    }
}

// The wire shape only carries four display fields.
impl Serialize for ServerInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ServerInfo", 4)?;
        state.serialize_field("ip", self.ip_display())?;
        state.serialize_field("location", self.location_display())?;
        state.serialize_field("latency", &self.latency_display())?;
        state.serialize_field("ssl_expiry", &self.ssl_expiry_display())?;
        state.end()
    }
}

/// Finding counts per severity tier, plus the count of good practices.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub safe: u32,
}

impl Stats {
    pub(crate) fn record(&mut self, tier: StatTier) {
        match tier {
            StatTier::High => self.high += 1,
            StatTier::Medium => self.medium += 1,
            StatTier::Low => self.low += 1,
            StatTier::Safe => self.safe += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low + self.safe
    }
}

// --- Report ---

/// The finished assessment of one site.
///
/// Only `ReportBuilder::finalize` can produce a `Report`, so a value in the
/// caller's hands always carries a clamped score and a matching grade.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    target: String,
    #[serde(serialize_with = "serialize_scan_time")]
    scan_time: DateTime<Local>,
    grade: Grade,
    risk_score: u8,
    vulnerabilities: Vec<Finding>,
    good_practices: Vec<String>,
    server_info: ServerInfo,
    stats: Stats,
}

impl Report {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        target: String,
        scan_time: DateTime<Local>,
        grade: Grade,
        risk_score: u8,
        vulnerabilities: Vec<Finding>,
        good_practices: Vec<String>,
        server_info: ServerInfo,
        stats: Stats,
    ) -> Self {
        Self { target, scan_time, grade, risk_score, vulnerabilities, good_practices, server_info, stats }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn scan_time(&self) -> DateTime<Local> {
        self.scan_time
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn vulnerabilities(&self) -> &[Finding] {
        &self.vulnerabilities
    }

    pub fn good_practices(&self) -> &[String] {
        &self.good_practices
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn find(&self, title: &str) -> Option<&Finding> {
        self.vulnerabilities.iter().find(|f| f.title == title)
    }
}

fn serialize_scan_time<S: Serializer>(time: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(SCAN_TIME_FORMAT))
}

/// The terminal, user-facing error shape: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResult {
    pub error: String,
}

/// What a caller of the pipeline hands back: a report or a short error.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AssessResponse {
    Report(Box<Report>),
    Error(ErrorResult),
}

impl AssessResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, AssessResponse::Error(_))
    }
}
