use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

const KEY_HINTS: &str = "a add · space toggle · e edit · d delete · tab filter · q quit";

/// Render the status row: transient notices on the left (falling back to
/// the remaining-item count), key hints on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();

    let (left_text, left_style) = match &app.status_message {
        Some(message) => (
            format!(" {}", message),
            Style::default().fg(app.theme.yellow).bg(bg),
        ),
        None => {
            let active = app.store.active_count();
            let noun = if active == 1 { "item" } else { "items" };
            (
                format!(" {} {} left", active, noun),
                Style::default().fg(app.theme.text).bg(bg),
            )
        }
    };
    let left_width = unicode::display_width(&left_text);
    spans.push(Span::styled(left_text, left_style));

    let width = area.width as usize;
    let hints_width = unicode::display_width(KEY_HINTS);
    if width > left_width + hints_width + 2 {
        let pad = width - left_width - hints_width - 1;
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
        spans.push(Span::styled(
            KEY_HINTS,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
