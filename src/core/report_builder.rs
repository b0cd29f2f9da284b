// src/core/report_builder.rs

use chrono::{DateTime, Local};
use tracing::debug;

use crate::core::grader;
use crate::core::knowledge_base::FindingDetail;
use crate::core::models::{Finding, Report, ServerInfo, StatTier, Stats};

/// The in-progress assessment.
///
/// Probes record into it through `&mut` in a fixed order, and `finalize`
/// consumes it. Every append also bumps exactly one `stats` bucket, so the
/// counts can never drift from the lists.
#[derive(Debug)]
pub struct ReportBuilder {
    target: String,
    scan_time: DateTime<Local>,
    raw_score: u32,
    vulnerabilities: Vec<Finding>,
    good_practices: Vec<String>,
    server_info: ServerInfo,
    stats: Stats,
}

impl ReportBuilder {
    pub fn new(target: impl Into<String>) -> Self {
        Self::started_at(target, Local::now())
    }

    pub fn started_at(target: impl Into<String>, scan_time: DateTime<Local>) -> Self {
        Self {
            target: target.into(),
            scan_time,
            raw_score: 0,
            vulnerabilities: Vec::new(),
            good_practices: Vec::new(),
            server_info: ServerInfo::default(),
            stats: Stats::default(),
        }
    }

    pub fn add_finding(&mut self, finding: Finding, weight: u32) {
        debug!(title = %finding.title, severity = %finding.severity, weight, "Recording finding.");
        self.stats.record(finding.severity.tier());
        self.raw_score = self.raw_score.saturating_add(weight);
        self.vulnerabilities.push(finding);
    }

    /// Records a catalogued finding with its catalogued weight.
    pub fn add_detail(&mut self, detail: &FindingDetail) {
        self.add_finding(detail.to_finding(), detail.weight);
    }

    pub fn add_good_practice(&mut self, practice: impl Into<String>) {
        let practice = practice.into();
        debug!(practice = %practice, "Recording good practice.");
        self.stats.record(StatTier::Safe);
        self.good_practices.push(practice);
    }

    pub fn server_info_mut(&mut self) -> &mut ServerInfo {
        &mut self.server_info
    }

    pub fn raw_score(&self) -> u32 {
        self.raw_score
    }

    pub fn vulnerabilities(&self) -> &[Finding] {
        &self.vulnerabilities
    }

    pub fn good_practices(&self) -> &[String] {
        &self.good_practices
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Clamps the score, grades it and seals the report.
    pub fn finalize(self) -> Report {
        let risk_score = grader::clamp_score(self.raw_score);
        let grade = grader::grade_for(risk_score);
        debug!(raw = self.raw_score, risk_score, %grade, "Report finalized.");
        Report::new(
            self.target,
            self.scan_time,
            grade,
            risk_score,
            self.vulnerabilities,
            self.good_practices,
            self.server_info,
            self.stats,
        )
    }
}
