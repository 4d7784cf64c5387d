//! Task lifecycle status.

use serde::{Deserialize, Serialize};

/// Client-visible lifecycle of a submitted job.
///
/// `pending → processing → completed | failed`. The last two are terminal:
/// once reached, the task is never polled again.
///
/// # Examples
///
/// ```
/// use reelsmith_core::TaskStatus;
///
/// assert!(TaskStatus::Failed.is_terminal());
/// assert!(!TaskStatus::Processing.is_terminal());
/// assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    /// Accepted by the remote service, not started
    #[default]
    Pending,
    /// Being generated
    Processing,
    /// Finished with an output
    Completed,
    /// Finished without an output
    Failed,
}

impl TaskStatus {
    /// Whether polling should stop for this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// Position in the lifecycle. Both terminal states share the last rank.
    pub fn rank(self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::Processing => 1,
            TaskStatus::Completed | TaskStatus::Failed => 2,
        }
    }

    /// Map a remote status string onto the client lifecycle.
    ///
    /// Returns `None` for vocabulary the client does not recognize.
    pub fn from_remote(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" | "not_started" | "submitted" => Some(TaskStatus::Pending),
            "in_progress" | "processing" | "running" | "generating" | "started" => {
                Some(TaskStatus::Processing)
            }
            "completed" | "succeeded" | "success" | "done" => Some(TaskStatus::Completed),
            "failed" | "error" | "cancelled" | "canceled" | "rejected" => Some(TaskStatus::Failed),
            _ => None,
        }
    }
}
