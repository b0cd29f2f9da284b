// src/app.rs

use ratatui::widgets::ListState;
use vanguard_rs_assessor::core::models::{ErrorResult, Finding, Report};
use vanguard_rs_assessor::export;

pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Disclaimer,
    Idle,
    Scanning,
    Finished,
}

/// What came back from the pipeline.
pub enum ScanOutcome {
    Report(Box<Report>),
    Failed(ErrorResult),
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub outcome: Option<ScanOutcome>,
    pub findings_state: ListState,
    pub spinner_frame: usize,
    pub export_status: ExportStatus,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Disclaimer,
            input: String::new(),
            outcome: None,
            findings_state: ListState::default(),
            spinner_frame: 0,
            export_status: ExportStatus::Idle,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.outcome {
            Some(ScanOutcome::Report(report)) => Some(&**report),
            _ => None,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        self.report().map(Report::vulnerabilities).unwrap_or_default()
    }

    pub fn selected_finding(&self) -> Option<&Finding> {
        self.findings_state.selected().and_then(|i| self.findings().get(i))
    }

    pub fn finish(&mut self, outcome: ScanOutcome) {
        self.findings_state = ListState::default();
        if let ScanOutcome::Report(report) = &outcome {
            if !report.vulnerabilities().is_empty() {
                self.findings_state.select(Some(0));
            }
        }
        self.outcome = Some(outcome);
        self.state = AppState::Finished;
    }

    pub fn scroll_up(&mut self) {
        let selected = self.findings_state.selected().unwrap_or(0);
        if !self.findings().is_empty() {
            self.findings_state.select(Some(selected.saturating_sub(1)));
        }
    }

    pub fn scroll_down(&mut self) {
        let len = self.findings().len();
        if len == 0 {
            return;
        }
        let next = self.findings_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.findings_state.select(Some(next));
    }

    pub fn on_tick(&mut self) {
        if let AppState::Scanning = self.state {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn export(&mut self) {
        let Some(report) = self.report() else {
            self.export_status = ExportStatus::Error("Nothing to export.".to_string());
            return;
        };
        self.export_status = match export::export_report(report, &export::default_export_dir()) {
            Ok(path) => ExportStatus::Success(path.display().to_string()),
            Err(e) => ExportStatus::Error(e.to_string()),
        };
    }

    pub fn quit(&mut self) { self.should_quit = true; }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.outcome = None;
        self.findings_state = ListState::default();
        self.spinner_frame = 0;
        self.export_status = ExportStatus::Idle;
    }
}
