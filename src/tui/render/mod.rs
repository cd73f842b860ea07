pub mod alert_popup;
pub mod entry_row;
pub mod filter_bar;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::util::unicode;

use super::app::App;
use super::theme::Theme;

/// Main render function; dispatches to sub-renderers.
///
/// Each draw rebuilds every row from scratch and records the clickable
/// regions into the App for mouse resolution; nothing is diffed.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: entry row | filter bar | task list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    app.row_hits.clear();

    entry_row::render_entry_row(frame, app, chunks[0]);
    filter_bar::render_filter_bar(frame, app, chunks[1]);
    list_view::render_list_view(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Blocking alert (rendered on top of everything)
    if app.alert.is_some() {
        alert_popup::render_alert_popup(frame, app, area);
    }
}

/// Push an editable buffer as spans with a block cursor and an optional
/// selection highlight. Splits at the cursor and selection boundaries.
pub(super) fn push_buffer_with_cursor<'a>(
    spans: &mut Vec<Span<'a>>,
    buffer: &str,
    cursor: usize,
    selection: Option<(usize, usize)>,
    theme: &Theme,
) {
    let base = Style::default().fg(theme.text_bright).bg(theme.background);
    let selected = Style::default().fg(theme.text_bright).bg(theme.selection_bg);
    let cursor_style = Style::default().fg(theme.background).bg(theme.text_bright);

    let cursor_end = unicode::next_grapheme_boundary(buffer, cursor).unwrap_or(buffer.len());

    let mut bounds: Vec<usize> = vec![0, buffer.len(), cursor.min(buffer.len()), cursor_end];
    if let Some((start, end)) = selection {
        bounds.push(start.min(buffer.len()));
        bounds.push(end.min(buffer.len()));
    }
    bounds.sort_unstable();
    bounds.dedup();

    for pair in bounds.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start >= end {
            continue;
        }
        let under_cursor = cursor < buffer.len() && start >= cursor && end <= cursor_end;
        let in_selection = selection.is_some_and(|(s, e)| start >= s && end <= e);
        let style = if under_cursor {
            cursor_style
        } else if in_selection {
            selected
        } else {
            base
        };
        spans.push(Span::styled(buffer[start..end].to_string(), style));
    }

    // Cursor sitting past the end renders as a block over a space
    if cursor >= buffer.len() {
        spans.push(Span::styled(" ".to_string(), cursor_style));
    }
}
