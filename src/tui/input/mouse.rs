use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::model::FilterMode;
use crate::tui::app::{App, DOUBLE_CLICK_WINDOW, Mode};

use super::*;

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    rect.contains(Position::new(x, y))
}

/// Resolve a left click against the regions the last render recorded.
/// Returns whether the click was acted on.
pub(super) fn handle_mouse_event(app: &mut App, event: MouseEvent) -> bool {
    let MouseEventKind::Down(MouseButton::Left) = event.kind else {
        return false;
    };
    app.status_message = None;

    let (x, y) = (event.column, event.row);

    // A blocking alert swallows the click
    if app.mode == Mode::Alert {
        app.dismiss_alert();
        return true;
    }

    // While editing, clicks on the editing row are suspended; any other
    // click blurs the session (commit path), then lands normally.
    if let Some(editing_id) = app.edit.as_ref().map(|s| s.task_id) {
        let editing_y = app
            .row_hits
            .iter()
            .find(|hit| hit.task_id == editing_id)
            .map(|hit| hit.y);
        if editing_y == Some(y) && contains(app.hits.list, x, y) {
            return true;
        }
        commit_edit(app);
    }

    if contains(app.hits.entry, x, y) {
        // The + is the add affordance; the rest of the row focuses the input
        if x == app.hits.entry_add_x {
            submit_entry(app);
        } else {
            app.mode = Mode::Entry;
        }
        return true;
    }

    if contains(app.hits.filter_all, x, y) {
        app.set_filter(FilterMode::All);
        return true;
    }
    if contains(app.hits.filter_active, x, y) {
        app.set_filter(FilterMode::Active);
        return true;
    }
    if contains(app.hits.filter_completed, x, y) {
        app.set_filter(FilterMode::Completed);
        return true;
    }
    if contains(app.hits.clear_completed, x, y) {
        app.store.clear_completed();
        app.clamp_cursor();
        return true;
    }

    let row = app.row_hits.iter().copied().find(|hit| hit.y == y);
    if let Some(hit) = row
        && contains(app.hits.list, x, y)
    {
        app.cursor = hit.index;

        if x == hit.delete_x {
            app.store.delete(hit.task_id);
            app.last_click = None;
            app.clamp_cursor();
            return true;
        }

        // A click toggles; a second click inside the window also opens the
        // editor, mirroring the browser's click → click → dblclick ordering
        // (the two toggles cancel out before the editor opens).
        app.store.toggle(hit.task_id);
        let now = Instant::now();
        match app.last_click {
            Some((at, id))
                if id == hit.task_id && now.duration_since(at) <= DOUBLE_CLICK_WINDOW =>
            {
                app.last_click = None;
                enter_edit(app, hit.task_id);
            }
            _ => app.last_click = Some((now, hit.task_id)),
        }
        app.clamp_cursor();
        return true;
    }

    // Clicks on empty space: nothing to do, but an edit blur above may have
    // already landed, so report handled either way
    true
}
