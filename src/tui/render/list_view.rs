use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{FilterMode, TaskId};
use crate::tui::app::{App, RowHit};
use crate::tui::render::push_buffer_with_cursor;
use crate::util::unicode;

/// Left gutter: " [x] " before the text starts.
const GUTTER: u16 = 5;

/// Render the visible task list, one row per task, rebuilding every row and
/// its hit-test entry from scratch.
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hits.list = area;

    let bg = app.theme.background;
    let visible: Vec<(TaskId, String, bool)> = app
        .visible_tasks()
        .iter()
        .map(|t| (t.id, t.text.clone(), t.completed))
        .collect();

    if visible.is_empty() {
        let message = match app.filter {
            FilterMode::All => " No tasks yet (press a to add one)",
            FilterMode::Active => " Nothing active",
            FilterMode::Completed => " Nothing completed",
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    if height == 0 || area.width <= GUTTER + 2 {
        return;
    }

    // Keep the cursor row inside the viewport
    if app.scroll_offset >= visible.len() {
        app.scroll_offset = visible.len() - 1;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    }
    if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let delete_x = area.x + area.width - 2;
    let text_x = area.x + GUTTER;
    let text_cells = (delete_x - text_x).saturating_sub(1) as usize;

    let mut lines: Vec<Line> = Vec::new();

    for (index, (id, text, completed)) in visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let y = area.y + (index - app.scroll_offset) as u16;
        app.row_hits.push(RowHit {
            y,
            index,
            task_id: *id,
            delete_x,
        });

        let editing = app.edit.as_ref().is_some_and(|s| s.task_id == *id);
        let is_cursor = index == app.cursor && !editing;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let mut spans: Vec<Span> = Vec::new();

        let box_style = if *completed {
            Style::default().fg(app.theme.green).bg(row_bg)
        } else {
            Style::default().fg(app.theme.dim).bg(row_bg)
        };
        let marker = if *completed { " [x] " } else { " [ ] " };
        spans.push(Span::styled(marker, box_style));

        if editing {
            // The edit session's buffer replaces the text; the delete
            // affordance disappears for the duration of the session
            if let Some(session) = &app.edit {
                let selection = session.selection_range();
                push_buffer_with_cursor(
                    &mut spans,
                    &session.buffer,
                    session.cursor,
                    selection,
                    &app.theme,
                );
            }
            lines.push(Line::from(spans));
            continue;
        }

        let shown = unicode::truncate_to_width(text, text_cells);
        let text_style = if *completed {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if is_cursor {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        let shown_width = unicode::display_width(&shown);
        spans.push(Span::styled(shown, text_style));

        // Pad out to the delete affordance column
        let pad = ((delete_x - text_x) as usize).saturating_sub(shown_width);
        if pad > 0 {
            spans.push(Span::styled(
                " ".repeat(pad),
                Style::default().bg(row_bg),
            ));
        }
        spans.push(Span::styled(
            "\u{00d7}",
            Style::default().fg(app.theme.red).bg(row_bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
