use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::FilterMode;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,

        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => move_down(app),
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => move_up(app),

        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Enter) => toggle_selected(app),
        (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Delete) => delete_selected(app),
        (KeyModifiers::NONE, KeyCode::Char('e')) => edit_selected(app),
        (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Char('i')) => {
            app.mode = Mode::Entry;
        }

        (KeyModifiers::NONE, KeyCode::Char('1')) => app.set_filter(FilterMode::All),
        (KeyModifiers::NONE, KeyCode::Char('2')) => app.set_filter(FilterMode::Active),
        (KeyModifiers::NONE, KeyCode::Char('3')) => app.set_filter(FilterMode::Completed),
        (KeyModifiers::NONE, KeyCode::Tab) => {
            let next = app.filter.next();
            app.set_filter(next);
        }

        (KeyModifiers::SHIFT, KeyCode::Char('C')) => clear_completed(app),

        _ => {}
    }
}

fn move_down(app: &mut App) {
    let len = app.visible_len();
    if len > 0 && app.cursor + 1 < len {
        app.cursor += 1;
    }
}

fn move_up(app: &mut App) {
    if app.cursor > 0 {
        app.cursor -= 1;
    }
}

pub(super) fn toggle_selected(app: &mut App) {
    if let Some(id) = app.cursor_task_id() {
        app.store.toggle(id);
        app.clamp_cursor();
    }
}

pub(super) fn delete_selected(app: &mut App) {
    if let Some(id) = app.cursor_task_id() {
        app.store.delete(id);
        app.clamp_cursor();
    }
}

pub(super) fn edit_selected(app: &mut App) {
    if let Some(id) = app.cursor_task_id() {
        enter_edit(app, id);
    }
}

pub(super) fn clear_completed(app: &mut App) {
    app.store.clear_completed();
    app.clamp_cursor();
}
