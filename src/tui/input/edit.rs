use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::TaskId;
use crate::tui::app::{App, EditSession, Mode};
use crate::util::unicode;

/// Open an edit session on a task's row. Completed tasks refuse the
/// transition, leaving the row untouched.
///
/// On entry the whole text is selected, so the first keystroke replaces it.
pub(super) fn enter_edit(app: &mut App, id: TaskId) {
    let Some(task) = app.store.get(id) else {
        return;
    };
    if task.completed {
        return;
    }
    let text = task.text.clone();

    let pos = app.visible_tasks().iter().position(|t| t.id == id);
    if let Some(pos) = pos {
        app.cursor = pos;
    }

    app.edit = Some(EditSession::new(id, &text));
    app.mode = Mode::Edit;
}

/// Key handling for an open edit session.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Commit; Enter never reaches the buffer, so no newline can appear
        (_, KeyCode::Enter) => commit_edit(app),
        // Revert to the original text, then the same exit steps as commit
        (_, KeyCode::Esc) => revert_edit(app),
        _ => {
            let Some(edit) = app.edit.as_mut() else {
                app.mode = Mode::Navigate;
                return;
            };
            match (key.modifiers, key.code) {
                (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
                    edit.selection_anchor = None;
                    edit.cursor = 0;
                }
                (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
                    edit.selection_anchor = None;
                    edit.cursor = edit.buffer.len();
                }
                // Kill to start of line
                (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
                    if !edit.delete_selection() && edit.cursor > 0 {
                        edit.buffer.drain(..edit.cursor);
                        edit.cursor = 0;
                    }
                }
                (_, KeyCode::Home) => {
                    edit.selection_anchor = None;
                    edit.cursor = 0;
                }
                (_, KeyCode::End) => {
                    edit.selection_anchor = None;
                    edit.cursor = edit.buffer.len();
                }
                (KeyModifiers::NONE, KeyCode::Left) => {
                    edit.selection_anchor = None;
                    if let Some(prev) = unicode::prev_grapheme_boundary(&edit.buffer, edit.cursor) {
                        edit.cursor = prev;
                    }
                }
                (KeyModifiers::NONE, KeyCode::Right) => {
                    edit.selection_anchor = None;
                    if let Some(next) = unicode::next_grapheme_boundary(&edit.buffer, edit.cursor) {
                        edit.cursor = next;
                    }
                }
                (KeyModifiers::NONE, KeyCode::Backspace) => edit.backspace(),
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                    edit.insert_char(c);
                }
                _ => {}
            }
        }
    }
}

/// Close the session on the commit path: a trimmed, non-empty, changed
/// buffer updates the task; anything else reverts silently and the row
/// re-renders from the stored original.
pub(super) fn commit_edit(app: &mut App) {
    let Some(session) = app.edit.take() else {
        app.mode = Mode::Navigate;
        return;
    };
    app.mode = Mode::Navigate;

    let new_text = session.buffer.trim().to_string();
    if !new_text.is_empty() && new_text != session.original {
        app.store.update_text(session.task_id, &new_text);
    }
}

/// Close the session on the revert path (Escape): the buffer is discarded
/// outright and the exit steps match the commit path.
pub(super) fn revert_edit(app: &mut App) {
    app.edit = None;
    app.mode = Mode::Navigate;
}
