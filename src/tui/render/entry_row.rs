use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::render::push_buffer_with_cursor;

/// Render the add-task input row. The leading `+` is the add affordance;
/// clicking anywhere else on the row focuses the input.
pub fn render_entry_row(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hits.entry = area;
    app.hits.entry_add_x = area.x + 1;

    let bg = app.theme.background;
    let focused = app.mode == Mode::Entry;

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(
        " + ",
        Style::default().fg(app.theme.green).bg(bg),
    ));

    if focused {
        push_buffer_with_cursor(
            &mut spans,
            &app.entry_buffer,
            app.entry_cursor,
            None,
            &app.theme,
        );
    } else if app.entry_buffer.is_empty() {
        spans.push(Span::styled(
            "What needs doing?",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            app.entry_buffer.clone(),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
