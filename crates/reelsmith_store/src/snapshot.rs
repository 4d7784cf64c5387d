//! Typed snapshot load and save.

use reelsmith_error::{ReelsmithResult, StorageError, StorageErrorKind};
use reelsmith_interface::{SnapshotKey, SnapshotStore};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

/// Load a snapshot, falling back to `T::default()`.
///
/// A missing snapshot, a read failure, or a malformed document all yield the
/// default. Failures are logged, never returned.
#[instrument(skip(store))]
pub async fn load_snapshot<T>(store: &dyn SnapshotStore, key: SnapshotKey) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.read(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No saved state, using defaults");
            return T::default();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read snapshot, using defaults");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Discarding malformed snapshot");
            T::default()
        }
    }
}

/// Serialize `value` in full and replace the snapshot.
#[instrument(skip(store, value))]
pub async fn save_snapshot<T>(store: &dyn SnapshotStore, key: SnapshotKey, value: &T) -> ReelsmithResult<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)
        .map_err(|e| StorageError::new(StorageErrorKind::Serialize(format!("{}: {}", key, e))))?;
    store.write(key, &json).await
}
