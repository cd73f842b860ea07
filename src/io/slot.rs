use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry, atomic_write};
use crate::model::task::Task;

/// Fixed slot name inside the data directory. The whole list lives in this
/// one file as a JSON array of {id, text, completed} records.
pub const SLOT_FILE: &str = "tasks.json";

/// Error type for slot writes. Loads never fail; they degrade to an empty
/// list instead.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize task list: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn slot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SLOT_FILE)
}

/// Load the task list from the slot.
///
/// An absent slot is a fresh install: empty list. Malformed content also
/// degrades to an empty list, but the raw payload is captured to the
/// recovery log first so the data is not silently gone.
pub fn load_tasks(data_dir: &Path) -> Vec<Task> {
    let path = slot_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            recovery::log_recovery(
                data_dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Load,
                    description: "slot unreadable".to_string(),
                    fields: vec![
                        ("Slot".to_string(), SLOT_FILE.to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: String::new(),
                },
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&text) {
        Ok(tasks) => tasks,
        Err(e) => {
            recovery::log_recovery(
                data_dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Load,
                    description: "malformed slot".to_string(),
                    fields: vec![
                        ("Slot".to_string(), SLOT_FILE.to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: text,
                },
            );
            Vec::new()
        }
    }
}

/// Overwrite the slot with the full current list. On write failure the
/// serialized list goes to the recovery log before the error is returned.
pub fn save_tasks(data_dir: &Path, tasks: &[Task]) -> Result<(), SlotError> {
    let path = slot_path(data_dir);
    let content = serde_json::to_string_pretty(tasks)?;
    if let Err(e) = atomic_write(&path, content.as_bytes()) {
        recovery::log_recovery(
            data_dir,
            RecoveryEntry {
                timestamp: Utc::now(),
                category: RecoveryCategory::Save,
                description: "slot write failed".to_string(),
                fields: vec![
                    ("Slot".to_string(), SLOT_FILE.to_string()),
                    ("Error".to_string(), e.to_string()),
                ],
                body: content,
            },
        );
        return Err(SlotError::Write { path, source: e });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskId;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task {
                id: TaskId(1715600000000),
                text: "Buy milk".into(),
                completed: false,
            },
            Task {
                id: TaskId(1715600000001),
                text: "Ship release".into(),
                completed: true,
            },
        ]
    }

    #[test]
    fn save_then_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let tasks = sample_tasks();

        save_tasks(tmp.path(), &tasks).unwrap();
        let loaded = load_tasks(tmp.path());

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn load_missing_slot_returns_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_tasks(tmp.path()).is_empty());
        // Degrading to empty is not an error: no recovery entry
        assert!(!recovery::recovery_log_path(tmp.path()).exists());
    }

    #[test]
    fn load_malformed_slot_degrades_to_empty_and_logs() {
        let tmp = TempDir::new().unwrap();
        fs::write(slot_path(tmp.path()), "not json {{{").unwrap();

        assert!(load_tasks(tmp.path()).is_empty());

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("load: malformed slot"));
        assert!(log.contains("not json {{{"));
    }

    #[test]
    fn load_accepts_string_ids_from_older_data() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            slot_path(tmp.path()),
            r#"[{"id":"1715600000000","text":"Buy milk","completed":false}]"#,
        )
        .unwrap();

        let loaded = load_tasks(tmp.path());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, TaskId(1715600000000));
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let tmp = TempDir::new().unwrap();
        save_tasks(tmp.path(), &sample_tasks()).unwrap();
        save_tasks(tmp.path(), &[]).unwrap();
        assert!(load_tasks(tmp.path()).is_empty());
    }

    #[test]
    fn saved_ids_are_numbers() {
        let tmp = TempDir::new().unwrap();
        save_tasks(tmp.path(), &sample_tasks()).unwrap();
        let raw = fs::read_to_string(slot_path(tmp.path())).unwrap();
        assert!(raw.contains("\"id\": 1715600000000"));
        assert!(!raw.contains("\"id\": \""));
    }
}
