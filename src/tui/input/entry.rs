use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::StoreError;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Key handling while the add-task input has focus.
pub(super) fn handle_entry(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => submit_entry(app),
        (_, KeyCode::Esc) => app.mode = Mode::Navigate,

        // Kill to start of line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.entry_buffer.clear();
            app.entry_cursor = 0;
        }
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => app.entry_cursor = 0,
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.entry_cursor = app.entry_buffer.len();
        }
        (_, KeyCode::Home) => app.entry_cursor = 0,
        (_, KeyCode::End) => app.entry_cursor = app.entry_buffer.len(),

        (KeyModifiers::NONE, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.entry_buffer, app.entry_cursor)
            {
                app.entry_cursor = prev;
            }
        }
        (KeyModifiers::NONE, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.entry_buffer, app.entry_cursor)
            {
                app.entry_cursor = next;
            }
        }

        (KeyModifiers::NONE, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.entry_buffer, app.entry_cursor)
            {
                app.entry_buffer.drain(prev..app.entry_cursor);
                app.entry_cursor = prev;
            }
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.entry_buffer.insert(app.entry_cursor, c);
            app.entry_cursor += c.len_utf8();
        }

        _ => {}
    }
}

/// Add the input's current value. Empty input raises the blocking alert and
/// mutates nothing; on success the field is cleared for the next task.
pub(super) fn submit_entry(app: &mut App) {
    match app.store.add(&app.entry_buffer) {
        Ok(id) => {
            app.entry_buffer.clear();
            app.entry_cursor = 0;
            // Follow the new task with the list cursor when the filter shows it
            let pos = app.visible_tasks().iter().position(|t| t.id == id);
            if let Some(pos) = pos {
                app.cursor = pos;
            }
        }
        Err(StoreError::EmptyText) => app.show_alert("You must write something!"),
    }
}
