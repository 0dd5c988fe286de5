use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the random part of a generated task id.
pub const TASK_ID_LENGTH: usize = 12;

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Opaque task identity. Stable for the lifetime of the task, including
/// across save and load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(nanoid::format(
            nanoid::rngs::default,
            &ID_ALPHABET,
            TASK_ID_LENGTH,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One entry of a task's movement history.
///
/// Column names are copied at the time of the move; renaming a column later
/// does not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub timestamp: DateTime<Utc>,
    pub from: String,
    pub to: String,
}

impl Movement {
    pub fn now(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Name and capacity of a column, used to build a project's initial columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,

    /// 0 means unlimited.
    #[serde(default)]
    pub wip_limit: usize,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, wip_limit: usize) -> Self {
        Self {
            name: name.into(),
            wip_limit,
        }
    }

    /// Backlog, In Progress, Review, Done; all unlimited.
    pub fn defaults() -> Vec<ColumnSpec> {
        ["Backlog", "In Progress", "Review", "Done"]
            .into_iter()
            .map(|name| ColumnSpec::new(name, 0))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    Moved { task_id: TaskId, movement: Movement },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnEvent {
    TaskAdded { column: String, task_id: TaskId },
    TaskRemoved { column: String, task_id: TaskId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEvent {
    TaskCreated { task_id: TaskId },
    TaskMoved { task_id: TaskId, from: usize, to: usize },
    Saved { path: std::path::PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    CurrentProjectChanged { index: usize },
}

/// Result of [`Project::move_task`](super::Project::move_task) when the
/// column indices were valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveOutcome {
    Moved,
    /// The task was not in the source column; nothing changed.
    NotInSource,
    /// The destination column is at its WIP limit; the task stayed put.
    ColumnFull,
}

impl MoveOutcome {
    pub fn is_moved(self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Moved => write!(f, "moved"),
            MoveOutcome::NotInSource => write!(f, "not in source column"),
            MoveOutcome::ColumnFull => write!(f, "destination column is full"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = TaskId::generate();
        let b = TaskId::generate();
        assert_eq!(a.as_str().len(), TASK_ID_LENGTH);
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_columns() {
        let names: Vec<_> = ColumnSpec::defaults().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Backlog", "In Progress", "Review", "Done"]);
    }

    #[test]
    fn test_move_outcome_display() {
        assert_eq!(MoveOutcome::Moved.to_string(), "moved");
        assert!(!MoveOutcome::ColumnFull.is_moved());
    }
}
