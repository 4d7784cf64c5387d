//! Ports for the remote generation service and snapshot persistence.

use crate::SnapshotKey;
use async_trait::async_trait;
use reelsmith_core::{Character, JobHandle, OptimizeMode, Settings, StatusReport, VideoJob};
use reelsmith_error::ReelsmithResult;

/// Remote generative-media service.
///
/// Settings are passed per call because the user may change them at any
/// time; implementations must not cache them.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Rewrite prompt text with the instruction template for `mode`.
    async fn optimize_prompt(
        &self,
        settings: &Settings,
        text: &str,
        mode: OptimizeMode,
    ) -> ReelsmithResult<String>;

    /// Submit a video generation job.
    async fn create_video(&self, settings: &Settings, job: &VideoJob)
    -> ReelsmithResult<JobHandle>;

    /// Create a reusable character from a clip of `source_url` between
    /// `start` and `end` seconds.
    async fn create_character(
        &self,
        settings: &Settings,
        source_url: &str,
        start: f64,
        end: f64,
    ) -> ReelsmithResult<Character>;

    /// Query the current status of a job, normalized.
    async fn query_status(&self, settings: &Settings, job_id: &str)
    -> ReelsmithResult<StatusReport>;

    /// Provider name for logs and metrics.
    fn provider_name(&self) -> &'static str;
}

/// Read/write access to named snapshots.
///
/// Each snapshot is an opaque serialized document replaced in full on
/// every write.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read a snapshot, `None` if it was never written.
    async fn read(&self, key: SnapshotKey) -> ReelsmithResult<Option<String>>;

    /// Replace a snapshot.
    async fn write(&self, key: SnapshotKey, snapshot: &str) -> ReelsmithResult<()>;

    /// Delete a snapshot. Deleting a missing snapshot is not an error.
    async fn remove(&self, key: SnapshotKey) -> ReelsmithResult<()>;
}
