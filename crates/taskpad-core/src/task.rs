use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the task list.
///
/// The on-disk form is a JSON object with `title`, `done` and `createdAt`
/// keys; `createdAt` is an RFC 3339 timestamp fixed at creation time.
/// A task has no identifier of its own: its position in the list at load
/// time is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub done: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            done: false,
            created_at: Utc::now(),
        }
    }
}
