// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use vanguard_rs_assessor::core::models::Grade;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
    text::Line,
};

/// Renders the summary widget: grade, risk gauge, finding counts and server facts.
///
/// Only draws content once a report is available.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Grade & score
            Constraint::Length(1), // Risk gauge
            Constraint::Length(1), // Spacer
            Constraint::Length(5), // Stats
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Server info
        ])
        .split(area);

    if !matches!(app.state, AppState::Finished) {
        return;
    }
    let Some(report) = app.report() else {
        return;
    };

    // --- Grade & Score ---
    let grade_color = match report.grade() {
        Grade::A => Color::Green,
        Grade::B => Color::Cyan,
        Grade::C => Color::Yellow,
        Grade::D => Color::LightRed,
        Grade::F => Color::Red,
    };
    let score_text = Text::from(vec![
        Line::from("Grade".bold()),
        Line::from(Span::styled(report.grade().to_string(), Style::default().fg(grade_color).add_modifier(Modifier::BOLD))),
        Line::from(format!("Risk score {}/100", report.risk_score())),
    ]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    // Lower is better, so the gauge fills with risk.
    let risk_gauge = Gauge::default()
        .percent(u16::from(report.risk_score()))
        .label("")
        .style(Style::default().fg(grade_color));
    frame.render_widget(risk_gauge, summary_chunks[1]);

    // --- Stats ---
    let stats = report.stats();
    let stats_lines = vec![
        Line::from(vec![Span::raw("High:   "), Span::styled(stats.high.to_string(), Style::default().fg(Color::Red))]),
        Line::from(vec![Span::raw("Medium: "), Span::styled(stats.medium.to_string(), Style::default().fg(Color::Yellow))]),
        Line::from(vec![Span::raw("Low:    "), Span::styled(stats.low.to_string(), Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw("Safe:   "), Span::styled(stats.safe.to_string(), Style::default().fg(Color::Green))]),
    ];
    let stats_block = Block::default().title("FINDINGS".bold());
    frame.render_widget(Paragraph::new(stats_lines).block(stats_block), summary_chunks[3]);

    // --- Server Info ---
    let info = report.server_info();
    let mut info_lines = vec![
        Line::from(format!("IP:       {}", info.ip_display())),
        Line::from(format!("Location: {}", info.location_display())),
        Line::from(format!("Latency:  {}", info.latency_display())),
        Line::from(format!("SSL:      {} ({})", info.ssl_expiry_display(), info.ssl_status)),
    ];
    if let Some(subject) = &info.ssl_subject {
        info_lines.push(Line::from(format!("Subject:  {}", subject)));
    }
    if let Some(issuer) = &info.ssl_issuer {
        info_lines.push(Line::from(format!("Issuer:   {}", issuer)));
    }
    info_lines.push(Line::from(""));
    for practice in report.good_practices() {
        info_lines.push(Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::raw(practice.as_str()),
        ]));
    }
    let info_block = Block::default().title("SERVER".bold());
    frame.render_widget(Paragraph::new(info_lines).block(info_block), summary_chunks[5]);
}
