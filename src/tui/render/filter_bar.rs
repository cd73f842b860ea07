use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::FilterMode;
use crate::tui::app::App;

/// Render the filter affordances and the clear-completed affordance.
/// Exactly one filter is marked active at a time.
pub fn render_filter_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut x = area.x;

    spans.push(Span::styled(" ", Style::default().bg(bg)));
    x += 1;

    for mode in [FilterMode::All, FilterMode::Active, FilterMode::Completed] {
        let label = format!(" {} ", mode.label());
        let width = label.len() as u16;
        let rect = Rect::new(x, area.y, width, 1);
        match mode {
            FilterMode::All => app.hits.filter_all = rect,
            FilterMode::Active => app.hits.filter_active = rect,
            FilterMode::Completed => app.hits.filter_completed = rect,
        }

        let style = if app.filter == mode {
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        x += width + 1;
    }

    // Clear-completed sits right-aligned; dimmed while there is nothing to
    // clear, but always clickable.
    let clear_label = "Clear completed";
    let clear_width = clear_label.len() as u16;
    let clear_x = (area.x + area.width).saturating_sub(clear_width + 1);
    if clear_x > x {
        spans.push(Span::styled(
            " ".repeat((clear_x - x) as usize),
            Style::default().bg(bg),
        ));
        let style = if app.store.completed_count() > 0 {
            Style::default().fg(app.theme.red).bg(bg)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(clear_label, style));
        app.hits.clear_completed = Rect::new(clear_x, area.y, clear_width, 1);
    } else {
        // Too narrow: drop the affordance rather than overlap the filters
        app.hits.clear_completed = Rect::default();
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
