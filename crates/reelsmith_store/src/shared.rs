//! Task list shared between the application and the polling loop.

use crate::{load_snapshot, save_snapshot, TaskStore};
use chrono::{DateTime, Utc};
use reelsmith_core::{StatusReport, Task};
use reelsmith_error::ReelsmithResult;
use reelsmith_interface::{SnapshotKey, SnapshotStore};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument};

/// Shared, persisted task list.
///
/// Every mutation is a whole-record replacement under one write lock,
/// followed by a full rewrite of the `tasks` snapshot and a revision
/// broadcast. The lock is never held across network calls.
#[derive(Clone)]
pub struct SharedTaskStore {
    inner: Arc<RwLock<TaskStore>>,
    revision: Arc<watch::Sender<u64>>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl std::fmt::Debug for SharedTaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTaskStore")
            .field("revision", &*self.revision.borrow())
            .finish_non_exhaustive()
    }
}

impl SharedTaskStore {
    /// Wrap a task list persisted to `snapshots`.
    pub fn new(tasks: TaskStore, snapshots: Arc<dyn SnapshotStore>) -> Self {
        let (revision, _) = watch::channel(tasks.revision());
        Self {
            inner: Arc::new(RwLock::new(tasks)),
            revision: Arc::new(revision),
            snapshots,
        }
    }

    /// Load the saved task list, or start empty.
    #[instrument(skip(snapshots))]
    pub async fn load(snapshots: Arc<dyn SnapshotStore>) -> Self {
        let tasks: TaskStore = load_snapshot(snapshots.as_ref(), SnapshotKey::Tasks).await;
        info!(count = tasks.len(), "Task list loaded");
        Self::new(tasks, snapshots)
    }

    /// Copy of every task, newest first.
    pub async fn list(&self) -> Vec<Task> {
        self.inner.read().await.tasks().to_vec()
    }

    /// Copy of one task.
    pub async fn get(&self, id: &str) -> Option<Task> {
        self.inner.read().await.get(id).cloned()
    }

    /// Non-terminal tasks in list order.
    pub async fn pending(&self) -> Vec<Task> {
        self.inner.read().await.pending()
    }

    /// Current revision.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver notified whenever the revision changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Add a freshly submitted task at the front.
    #[instrument(skip(self, task), fields(id = %task.id()))]
    pub async fn insert(&self, task: Task) -> ReelsmithResult<()> {
        let mut tasks = self.inner.write().await;
        tasks.insert(task);
        self.commit(&tasks).await
    }

    /// Remove a task.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> ReelsmithResult<Option<Task>> {
        let mut tasks = self.inner.write().await;
        let removed = tasks.remove(id);
        if removed.is_some() {
            self.commit(&tasks).await?;
        }
        Ok(removed)
    }

    /// Drop every completed or failed task.
    pub async fn clear_finished(&self) -> ReelsmithResult<usize> {
        let mut tasks = self.inner.write().await;
        let removed = tasks.clear_finished();
        if removed > 0 {
            self.commit(&tasks).await?;
        }
        Ok(removed)
    }

    /// Replace the task `id` with whatever `change` derives from it.
    ///
    /// `change` returning `None` means no change. A task that no longer
    /// exists is left absent. Returns the stored replacement, if any.
    pub async fn update<F>(&self, id: &str, change: F) -> ReelsmithResult<Option<Task>>
    where
        F: FnOnce(&Task) -> Option<Task> + Send,
    {
        let mut tasks = self.inner.write().await;
        let Some(current) = tasks.get(id) else {
            debug!(id, "Task no longer listed, skipping update");
            return Ok(None);
        };
        let Some(next) = change(current) else {
            return Ok(None);
        };
        tasks.replace(next.clone());
        self.commit(&tasks).await?;
        Ok(Some(next))
    }

    /// Merge a status report into task `id`.
    #[instrument(skip(self, report), fields(status = %report.status))]
    pub async fn apply_report(
        &self,
        id: &str,
        report: &StatusReport,
        now: DateTime<Utc>,
    ) -> ReelsmithResult<Option<Task>> {
        let updated = self.update(id, |task| task.merge(report, now)).await?;
        if let Some(task) = &updated {
            if task.is_terminal() {
                info!(id, status = %task.status(), "Task finished");
            } else {
                debug!(id, status = %task.status(), progress = ?task.progress(), "Task updated");
            }
        }
        Ok(updated)
    }

    async fn commit(&self, tasks: &TaskStore) -> ReelsmithResult<()> {
        self.revision.send_replace(tasks.revision());
        save_snapshot(self.snapshots.as_ref(), SnapshotKey::Tasks, tasks).await
    }
}
