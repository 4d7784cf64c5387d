//! In-memory snapshots.

use async_trait::async_trait;
use reelsmith_error::ReelsmithResult;
use reelsmith_interface::{SnapshotKey, SnapshotStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot store that keeps everything in memory. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshots: Arc<RwLock<HashMap<SnapshotKey, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots held.
    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    /// Whether no snapshot is held.
    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn read(&self, key: SnapshotKey) -> ReelsmithResult<Option<String>> {
        Ok(self.snapshots.read().await.get(&key).cloned())
    }

    async fn write(&self, key: SnapshotKey, snapshot: &str) -> ReelsmithResult<()> {
        self.snapshots
            .write()
            .await
            .insert(key, snapshot.to_string());
        Ok(())
    }

    async fn remove(&self, key: SnapshotKey) -> ReelsmithResult<()> {
        self.snapshots.write().await.remove(&key);
        Ok(())
    }
}
