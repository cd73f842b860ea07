mod edit;
mod entry;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use entry::*;
#[allow(unused_imports)]
use mouse::*;
#[allow(unused_imports)]
use navigate::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    match app.mode {
        // The alert is blocking: any key dismisses it, nothing else runs
        Mode::Alert => app.dismiss_alert(),
        Mode::Navigate => handle_navigate(app, key),
        Mode::Entry => handle_entry(app, key),
        Mode::Edit => handle_edit(app, key),
    }
}

/// Handle a mouse event. Returns whether it was acted on.
pub fn handle_mouse(app: &mut App, event: MouseEvent) -> bool {
    handle_mouse_event(app, event)
}
