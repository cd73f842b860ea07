use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::{config_io, slot};
use crate::model::{Config, FilterMode, Task, TaskId, filter};
use crate::store::TaskStore;
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// Two clicks on the same row within this window count as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving around the list
    Navigate,
    /// The add-task input has focus
    Entry,
    /// An edit session is open on one row
    Edit,
    /// A blocking notification is showing; all other input is held
    Alert,
}

/// Transient state for editing one row's text in place.
///
/// Created on entry to edit mode and dropped on exit, so nothing from one
/// session can leak into the next.
#[derive(Debug)]
pub struct EditSession {
    pub task_id: TaskId,
    /// Text as it was when the session opened; commit compares against this
    pub original: String,
    pub buffer: String,
    /// Byte offset into `buffer`
    pub cursor: usize,
    /// Selection anchor; entry selects the whole text so the first
    /// keystroke replaces it
    pub selection_anchor: Option<usize>,
}

impl EditSession {
    pub fn new(task_id: TaskId, original: &str) -> Self {
        EditSession {
            task_id,
            original: original.to_string(),
            buffer: original.to_string(),
            cursor: original.len(),
            selection_anchor: if original.is_empty() { None } else { Some(0) },
        }
    }

    /// Selected byte range, if a non-empty selection exists.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// Delete the selected range. Returns whether anything was deleted.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection_anchor = None;
            return false;
        };
        self.buffer.drain(start..end);
        self.cursor = start;
        self.selection_anchor = None;
        true
    }

    pub fn insert_char(&mut self, c: char) {
        self.delete_selection();
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }
}

/// Clickable regions recorded by the renderer on each draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitMap {
    pub entry: Rect,
    /// Column of the `+` add affordance inside the entry row
    pub entry_add_x: u16,
    pub filter_all: Rect,
    pub filter_active: Rect,
    pub filter_completed: Rect,
    pub clear_completed: Rect,
    pub list: Rect,
}

/// One rendered task row, for mouse resolution.
#[derive(Debug, Clone, Copy)]
pub struct RowHit {
    pub y: u16,
    /// Index into the visible (filtered) list
    pub index: usize,
    pub task_id: TaskId,
    /// Column of the `×` delete affordance
    pub delete_x: u16,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub filter: FilterMode,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub data_dir: PathBuf,

    /// Add-task input field
    pub entry_buffer: String,
    pub entry_cursor: usize,

    /// Cursor index into the visible list
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,

    /// Open edit session, if any (Mode::Edit)
    pub edit: Option<EditSession>,

    /// Blocking notification text (Mode::Alert)
    pub alert: Option<String>,
    /// Mode to restore when the alert is dismissed
    pub alert_return: Mode,

    /// Transient notice for the status row
    pub status_message: Option<String>,

    /// Last left click, for double-click detection
    pub last_click: Option<(Instant, TaskId)>,

    /// Hit-test data from the last render
    pub hits: HitMap,
    pub row_hits: Vec<RowHit>,

    /// Save on the next draw (set after every handled event)
    pub needs_save: bool,
}

impl App {
    pub fn new(store: TaskStore, config: &Config, data_dir: PathBuf) -> Self {
        App {
            store,
            filter: FilterMode::All,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            data_dir,
            entry_buffer: String::new(),
            entry_cursor: 0,
            cursor: 0,
            scroll_offset: 0,
            edit: None,
            alert: None,
            alert_return: Mode::Navigate,
            status_message: None,
            last_click: None,
            hits: HitMap::default(),
            row_hits: Vec::new(),
            needs_save: false,
        }
    }

    /// The filtered list in store order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible(self.store.tasks(), self.filter)
    }

    pub fn visible_len(&self) -> usize {
        self.visible_tasks().len()
    }

    /// Id of the task under the list cursor.
    pub fn cursor_task_id(&self) -> Option<TaskId> {
        self.visible_tasks().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the visible list after mutations or filter
    /// changes.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Select a filter mode. Exactly one is active at a time; the filter bar
    /// reflects it on the next draw.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
        self.clamp_cursor();
    }

    /// Raise a blocking notification. Input is held until dismissed, then
    /// the previous mode is restored.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
        self.alert_return = self.mode;
        self.mode = Mode::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.mode = self.alert_return;
    }

    /// Write the whole list to the slot. Failures surface on the status row;
    /// the lost payload is already in the recovery log.
    pub fn save(&mut self) {
        if let Err(e) = slot::save_tasks(&self.data_dir, self.store.tasks()) {
            self.status_message = Some(format!("save failed: {}", e));
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(data_dir)?;
    let config = config_io::read_config(data_dir)?;
    let tasks = slot::load_tasks(data_dir);
    let mut app = App::new(TaskStore::new(tasks), &config, data_dir.to_path_buf());
    // The load-time draw re-saves what was just read, same as every later one
    app.needs_save = true;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // The draw above is the single choke point for persistence: every
        // handled event is followed by a redraw, then a save, including
        // filter-only changes that re-save identical data.
        if app.needs_save {
            app.needs_save = false;
            app.save();
        }

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    app.needs_save = true;
                }
                Event::Mouse(mouse) => {
                    if input::handle_mouse(app, mouse) {
                        app.needs_save = true;
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}
