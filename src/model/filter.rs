use crate::model::task::Task;

/// Visibility criterion for the task list. Process-wide single current
/// value, changed only by explicit user selection, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Active => "Active",
            FilterMode::Completed => "Completed",
        }
    }

    /// Cycle order for Tab: all → active → completed → all
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Active,
            FilterMode::Active => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }
}

/// Pure projection of the store's ordered list onto the current filter.
/// Store order is preserved.
pub fn visible(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match mode {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        })
        .collect()
}
