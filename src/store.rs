use chrono::Utc;

use crate::model::task::{Task, TaskId};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task text must not be empty")]
    EmptyText,
}

/// Owner of the ordered task list. Created once at startup and living for
/// the whole process; every other component reads it and requests mutations
/// through these operations.
///
/// Mutations never save or redraw by themselves; the event loop does both
/// after every handled event.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks not yet completed.
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Append a new task. The trimmed text must be non-empty; insertion
    /// order is display order within a filter. Returns the assigned id.
    pub fn add(&mut self, text: &str) -> Result<TaskId, StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let id = self.fresh_id();
        self.tasks.push(Task::new(id, trimmed));
        Ok(id)
    }

    /// Flip the completion flag of the matching task. No-op (returns false)
    /// when the id is not found.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove the matching task. No-op when the id is not found.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove every completed task, preserving the relative order of the
    /// rest. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    /// Replace a task's text, but only when the trimmed replacement is
    /// non-empty and differs from the current text. Returns whether the
    /// task changed; on false the caller restores the displayed content.
    pub fn update_text(&mut self, id: TaskId, new_text: &str) -> bool {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.text == trimmed {
            return false;
        }
        task.text = trimmed.to_string();
        true
    }

    /// Millisecond timestamp, nudged forward when it would collide with an
    /// existing id (two adds in the same millisecond).
    fn fresh_id(&self) -> TaskId {
        let now = Utc::now().timestamp_millis();
        match self.tasks.iter().map(|t| t.id.0).max() {
            Some(max) if now <= max => TaskId(max + 1),
            _ => TaskId(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(texts: &[(&str, bool)]) -> TaskStore {
        let tasks = texts
            .iter()
            .enumerate()
            .map(|(i, (text, completed))| Task {
                id: TaskId(i as i64 + 1),
                text: text.to_string(),
                completed: *completed,
            })
            .collect();
        TaskStore::new(tasks)
    }

    #[test]
    fn add_appends_an_uncompleted_task() {
        let mut store = TaskStore::default();
        let id = store.add("Buy milk").unwrap();
        assert_eq!(store.len(), 1);
        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        let mut store = TaskStore::default();
        let id = store.add("  Buy milk  ").unwrap();
        assert_eq!(store.get(id).unwrap().text, "Buy milk");
    }

    #[test]
    fn add_rejects_empty_and_whitespace_text() {
        let mut store = TaskStore::default();
        assert!(matches!(store.add(""), Err(StoreError::EmptyText)));
        assert!(matches!(store.add("   "), Err(StoreError::EmptyText)));
        assert!(store.is_empty());
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = TaskStore::default();
        store.add("one").unwrap();
        store.add("two").unwrap();
        store.add("three").unwrap();
        let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn rapid_adds_get_distinct_increasing_ids() {
        let mut store = TaskStore::default();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn fresh_id_moves_past_a_future_dated_id() {
        // A clock that went backwards must not produce a duplicate
        let mut store = TaskStore::new(vec![Task::new(TaskId(i64::MAX - 1), "future")]);
        let id = store.add("next").unwrap();
        assert_eq!(id, TaskId(i64::MAX));
    }

    #[test]
    fn toggle_flips_and_double_toggle_restores() {
        let mut store = store_with(&[("one", false)]);
        let id = TaskId(1);
        assert!(store.toggle(id));
        assert!(store.get(id).unwrap().completed);
        assert!(store.toggle(id));
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        let mut store = store_with(&[("one", false)]);
        assert!(!store.toggle(TaskId(999)));
        assert!(!store.get(TaskId(1)).unwrap().completed);
    }

    #[test]
    fn delete_removes_only_the_match() {
        let mut store = store_with(&[("one", false), ("two", true), ("three", false)]);
        assert!(store.delete(TaskId(2)));
        let ids: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TaskId(1), TaskId(3)]);
        assert!(!store.delete(TaskId(2)));
    }

    #[test]
    fn clear_completed_keeps_the_rest_in_order() {
        let mut store = store_with(&[
            ("one", false),
            ("two", true),
            ("three", false),
            ("four", true),
        ]);
        assert_eq!(store.clear_completed(), 2);
        let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "three"]);
        assert!(store.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn update_text_applies_a_real_change() {
        let mut store = store_with(&[("Task A", false)]);
        assert!(store.update_text(TaskId(1), "Task A2"));
        assert_eq!(store.get(TaskId(1)).unwrap().text, "Task A2");
    }

    #[test]
    fn update_text_trims_before_storing() {
        let mut store = store_with(&[("Task A", false)]);
        assert!(store.update_text(TaskId(1), "  Task A2  "));
        assert_eq!(store.get(TaskId(1)).unwrap().text, "Task A2");
    }

    #[test]
    fn update_text_rejects_empty_unchanged_and_unknown() {
        let mut store = store_with(&[("Task A", false)]);
        assert!(!store.update_text(TaskId(1), ""));
        assert!(!store.update_text(TaskId(1), "   "));
        assert!(!store.update_text(TaskId(1), "Task A"));
        assert!(!store.update_text(TaskId(999), "other"));
        assert_eq!(store.get(TaskId(1)).unwrap().text, "Task A");
    }

    #[test]
    fn counts_track_completion() {
        let store = store_with(&[("one", false), ("two", true), ("three", false)]);
        assert_eq!(store.active_count(), 2);
        assert_eq!(store.completed_count(), 1);
    }
}
