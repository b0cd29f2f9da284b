// src/ui/widgets/footer.rs

use crate::app::{App, AppState, ExportStatus};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let spans = match app.state {
        AppState::Disclaimer => Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" to continue, "),
            Span::styled("Q", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" to quit."),
        ]),
        AppState::Idle => Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" to scan, "),
            Span::styled("Esc", Style::new().bold().fg(Color::Yellow)),
            Span::raw(" to quit."),
        ]),
        AppState::Finished => match &app.export_status {
            ExportStatus::Idle => Line::from(vec![
                Span::styled("[N]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("ew Scan, "),
                Span::styled("[E]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("xport JSON, "),
                Span::styled("[Q]", Style::new().bold().fg(Color::Yellow)),
                Span::raw("uit"),
            ]),
            ExportStatus::Success(path) => Line::from(vec![
                Span::styled("Exported to ", Style::new().fg(Color::Green)),
                Span::raw(path.as_str()),
            ]),
            ExportStatus::Error(e) => Line::from(vec![
                Span::styled("Export failed: ", Style::new().fg(Color::Red)),
                Span::raw(e.as_str()),
            ]),
        },
        AppState::Scanning => Line::from("Scanning... Press Q to quit."),
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
