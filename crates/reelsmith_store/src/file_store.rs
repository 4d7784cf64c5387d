//! One JSON file per snapshot.

use async_trait::async_trait;
use reelsmith_error::{ReelsmithResult, StorageError, StorageErrorKind};
use reelsmith_interface::{SnapshotKey, SnapshotStore};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Snapshot store writing `<dir>/<key>.json`.
///
/// Writes go through a uniquely named temp file followed by a rename, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> ReelsmithResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        debug!("Snapshot directory ready");
        Ok(Self { dir })
    }

    /// Create a store in the platform data directory (`<data_dir>/reelsmith`).
    pub fn in_data_dir() -> ReelsmithResult<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            StorageError::new(StorageErrorKind::DirectoryCreation(
                "no platform data directory".to_string(),
            ))
        })?;
        Self::new(base.join("reelsmith"))
    }

    /// Directory holding the snapshot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `key`.
    pub fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    #[instrument(skip(self))]
    async fn read(&self, key: SnapshotKey) -> ReelsmithResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "Snapshot read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot on disk");
                Ok(None)
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[instrument(skip(self, snapshot), fields(bytes = snapshot.len()))]
    async fn write(&self, key: SnapshotKey, snapshot: &str) -> ReelsmithResult<()> {
        let path = self.path_for(key);
        let temp_path = self
            .dir
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4().simple()));

        tokio::fs::write(&temp_path, snapshot).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        debug!(path = %path.display(), "Snapshot written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: SnapshotKey) -> ReelsmithResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Remove(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
