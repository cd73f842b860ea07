use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::model::{Config, Task, TaskId};
use crate::store::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 16;

/// Build an App over an in-memory store; the data dir is never touched by
/// render or input handlers (only the event loop saves).
pub fn app_with_tasks(texts: &[(&str, bool)]) -> App {
    let tasks = texts
        .iter()
        .enumerate()
        .map(|(i, (text, completed))| Task {
            id: TaskId(i as i64 + 1),
            text: text.to_string(),
            completed: *completed,
        })
        .collect();
    App::new(
        TaskStore::new(tasks),
        &Config::default(),
        PathBuf::from("/tmp/ticklist-test"),
    )
}

/// Draw the whole app into an in-memory buffer and return plain text
/// (no styles). Also populates the app's hit-test regions.
pub fn draw_to_string(app: &mut App, w: u16, h: u16) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| super::render(frame, app))
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterMode;
    use crate::tui::app::Mode;

    #[test]
    fn list_rows_show_marker_text_and_delete_affordance() {
        let mut app = app_with_tasks(&[("Buy milk", false), ("Ship release", true)]);
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);

        assert!(screen.contains("[ ] Buy milk"));
        assert!(screen.contains("[x] Ship release"));
        // One delete affordance per row
        assert_eq!(screen.matches('\u{00d7}').count(), 2);
    }

    #[test]
    fn filtered_draw_shows_only_the_projection() {
        let mut app = app_with_tasks(&[("Buy milk", false), ("Ship release", true)]);
        app.set_filter(FilterMode::Active);
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);

        assert!(screen.contains("Buy milk"));
        assert!(!screen.contains("Ship release"));
    }

    #[test]
    fn draw_records_hit_regions() {
        let mut app = app_with_tasks(&[("one", false), ("two", false)]);
        draw_to_string(&mut app, TERM_W, TERM_H);

        assert!(app.hits.entry.width > 0);
        assert!(app.hits.filter_all.width > 0);
        assert!(app.hits.filter_active.width > 0);
        assert!(app.hits.filter_completed.width > 0);
        assert!(app.hits.clear_completed.width > 0);
        assert_eq!(app.row_hits.len(), 2);
        assert_eq!(app.row_hits[0].index, 0);
        assert_ne!(app.row_hits[0].y, app.row_hits[1].y);
    }

    #[test]
    fn empty_list_shows_a_hint_instead_of_rows() {
        let mut app = app_with_tasks(&[]);
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);

        assert!(screen.contains("No tasks yet"));
        assert!(app.row_hits.is_empty());
    }

    #[test]
    fn entry_placeholder_gives_way_to_typed_text() {
        let mut app = app_with_tasks(&[]);
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("What needs doing?"));

        app.mode = Mode::Entry;
        app.entry_buffer = "Buy milk".into();
        app.entry_cursor = app.entry_buffer.len();
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("Buy milk"));
        assert!(!screen.contains("What needs doing?"));
    }

    #[test]
    fn alert_popup_renders_over_the_list() {
        let mut app = app_with_tasks(&[("one", false)]);
        app.show_alert("You must write something!");
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);

        assert!(screen.contains("You must write something!"));
        assert!(screen.contains("press any key"));
    }

    #[test]
    fn status_row_counts_remaining_items() {
        let mut app = app_with_tasks(&[("one", false), ("two", true), ("three", false)]);
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("2 items left"));

        let mut app = app_with_tasks(&[("one", false)]);
        let screen = draw_to_string(&mut app, TERM_W, TERM_H);
        assert!(screen.contains("1 item left"));
    }

    #[test]
    fn long_text_is_truncated_with_an_ellipsis() {
        let mut app = app_with_tasks(&[(
            "a very long task description that cannot possibly fit on one row",
            false,
        )]);
        let screen = draw_to_string(&mut app, 30, TERM_H);
        assert!(screen.contains('\u{2026}'));
    }
}
