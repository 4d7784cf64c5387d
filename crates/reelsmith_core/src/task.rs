//! Submitted jobs and their reconciliation with remote status.

use crate::{ModelVariant, Orientation, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized result of one status query.
///
/// The remote service answers in more than one shape; the client adapter
/// reduces all of them to this type before anything else looks at them.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{StatusReport, TaskStatus};
///
/// let report = StatusReport::new(TaskStatus::Completed)
///     .with_video_url("https://cdn.example/v.mp4")
///     .with_progress(100);
/// assert_eq!(report.progress, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusReport {
    /// Current status
    pub status: TaskStatus,
    /// Progress percentage (0-100)
    pub progress: Option<u8>,
    /// Output video URL
    pub video_url: Option<String>,
    /// Output thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Why the job failed
    pub failure_reason: Option<String>,
    /// Completion time reported by the remote service
    pub completed_at: Option<DateTime<Utc>>,
}

impl StatusReport {
    /// Report carrying only a status.
    pub fn new(status: TaskStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// With progress, clamped to 100.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress.min(100));
        self
    }

    /// With output video URL.
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// With thumbnail URL.
    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// With failure reason.
    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }

    /// With remote completion time.
    pub fn with_completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }
}

/// One submitted video job as tracked locally.
///
/// Fields are read-only from outside; a task only changes through
/// [`Task::merge`] (driven by polling) or [`Task::give_up`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Remote job identifier
    id: String,
    /// Lifecycle status
    status: TaskStatus,
    /// Prompt the job was created from
    prompt: String,
    /// Model used
    model: ModelVariant,
    /// Frame orientation
    orientation: Orientation,
    /// Requested duration in seconds
    seconds: u32,
    /// When the job was submitted
    created_at: DateTime<Utc>,
    /// When the job first reached a terminal status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    /// Output video URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video_url: Option<String>,
    /// Output thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    /// Progress percentage (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    progress: Option<u8>,
    /// Why the job failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure_reason: Option<String>,
}

impl Task {
    /// Record a freshly submitted job.
    pub fn new(
        id: impl Into<String>,
        status: TaskStatus,
        prompt: impl Into<String>,
        model: ModelVariant,
        orientation: Orientation,
        seconds: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            prompt: prompt.into(),
            model,
            orientation,
            seconds,
            created_at,
            completed_at: None,
            video_url: None,
            thumbnail_url: None,
            progress: None,
            failure_reason: None,
        }
    }

    /// Whether polling has finished for this task.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Fold a status report into this task.
    ///
    /// Returns the replacement record when anything visible changed, `None`
    /// otherwise. Merges are monotonic: a terminal task never changes, and a
    /// report whose status is earlier in the lifecycle than ours is ignored,
    /// so a slow response cannot overwrite a newer one. `completed_at` is set
    /// on the first transition into a terminal status, from the remote time
    /// if present or `now`, and never again.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use reelsmith_core::{ModelVariant, Orientation, StatusReport, Task, TaskStatus};
    ///
    /// let task = Task::new("vid_1", TaskStatus::Processing, "a cat", ModelVariant::Sora2,
    ///     Orientation::Landscape, 10, Utc::now());
    /// let report = StatusReport::new(TaskStatus::Completed).with_video_url("https://x/y.mp4");
    /// let merged = task.merge(&report, Utc::now()).unwrap();
    /// assert_eq!(*merged.status(), TaskStatus::Completed);
    /// assert!(merged.completed_at().is_some());
    /// ```
    pub fn merge(&self, report: &StatusReport, now: DateTime<Utc>) -> Option<Task> {
        if self.is_terminal() {
            return None;
        }
        if report.status.rank() < self.status.rank() {
            tracing::debug!(
                task_id = %self.id,
                local = %self.status,
                remote = %report.status,
                "Ignoring status report older than local state"
            );
            return None;
        }

        let mut next = self.clone();
        next.status = report.status;
        if let Some(progress) = report.progress {
            next.progress = Some(progress.min(100));
        }
        if report.video_url.is_some() {
            next.video_url = report.video_url.clone();
        }
        if report.thumbnail_url.is_some() {
            next.thumbnail_url = report.thumbnail_url.clone();
        }
        if report.failure_reason.is_some() {
            next.failure_reason = report.failure_reason.clone();
        }
        if next.status.is_terminal() && next.completed_at.is_none() {
            next.completed_at = Some(report.completed_at.unwrap_or(now));
        }

        (next != *self).then_some(next)
    }

    /// Mark a non-terminal task failed locally, e.g. after too many polls.
    pub fn give_up(&self, reason: impl Into<String>, now: DateTime<Utc>) -> Option<Task> {
        if self.is_terminal() {
            return None;
        }
        let mut next = self.clone();
        next.status = TaskStatus::Failed;
        next.failure_reason = Some(reason.into());
        next.completed_at = Some(now);
        Some(next)
    }
}
