use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique task identifier: creation time in milliseconds since the Unix
/// epoch, bumped past the current maximum when two adds land in the same
/// millisecond.
///
/// Stored data may carry ids as JSON numbers or numeric strings; both
/// deserialize into the same canonical integer, so every comparison after
/// the boundary is exact. Serialization always emits a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = TaskId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a task id as an integer or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TaskId, E> {
                Ok(TaskId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TaskId, E> {
                i64::try_from(v)
                    .map(TaskId)
                    .map_err(|_| E::custom("task id out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TaskId, E> {
                v.trim()
                    .parse::<i64>()
                    .map(TaskId)
                    .map_err(|_| E::custom(format!("invalid task id: {:?}", v)))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A single task: identity, text, completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty once stored
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new uncompleted task.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            completed: false,
        }
    }
}
