// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, ScanOutcome, SPINNER_CHARS};
use vanguard_rs_assessor::core::models::Severity;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    text::Line,
};

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Severity::High => Style::default().fg(Color::Red),
        Severity::Medium => Style::default().fg(Color::Yellow),
        Severity::Low => Style::default().fg(Color::Cyan),
    }
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Report (Navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Scanning => {
                let spinner_char = SPINNER_CHARS[app.spinner_frame];
                Paragraph::new(
                    Line::from(vec![
                        Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                        Span::raw("Scanning... Please wait."),
                    ])
                ).alignment(Alignment::Center)
            },
            _ => Paragraph::new("Scan results will appear here...")
                .alignment(Alignment::Center),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    // A failed assessment shows only its short message.
    if let Some(ScanOutcome::Failed(err)) = &app.outcome {
        let text = Text::from(vec![
            Line::from(""),
            Line::from("✗ ASSESSMENT FAILED".bold().fg(Color::Red)),
            Line::from(""),
            Line::from(err.error.as_str()),
        ]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let items: Vec<ListItem> = app.findings().iter().map(|f| {
        ListItem::new(Line::from(vec![
            Span::styled(format!("[{}] ", f.severity), Style::default().fg(Color::DarkGray)),
            Span::styled(f.title.clone(), severity_style(f.severity)),
        ]))
    }).collect();

    let findings_list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(findings_list, chunks[0], &mut app.findings_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    if let Some(finding) = app.selected_finding() {
        let text = vec![
            Line::from(""),
            Line::from("WHAT IT MEANS:".yellow().bold()),
            Line::from(finding.layman_explanation.as_str()),
            Line::from(""),
            Line::from("HOW TO FIX:".yellow().bold()),
            Line::from(finding.technical_fix.as_str()),
        ];
        let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
        frame.render_widget(p, chunks[1]);
    } else {
        render_placeholder_details(frame, app, detail_block, chunks[1]);
    }
}

fn render_placeholder_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let placeholder_text = if app.findings().is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from("✓ EXCELLENT SECURITY POSTURE".bold().fg(Color::Green)),
            Line::from(""),
            Line::from("No weaknesses were found during the assessment."),
        ])
    } else {
        Text::from("Select an item above to see details.")
    };

    let p = Paragraph::new(placeholder_text).alignment(Alignment::Center).block(block);
    frame.render_widget(p, area);
}
