//! Shared interface types.

use serde::{Deserialize, Serialize};

/// Name of one independently persisted snapshot.
///
/// # Examples
///
/// ```
/// use reelsmith_interface::SnapshotKey;
///
/// assert_eq!(SnapshotKey::Tasks.as_ref(), "tasks");
/// assert_eq!("characters".parse::<SnapshotKey>().unwrap(), SnapshotKey::Characters);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SnapshotKey {
    /// Base URL and API key
    Settings,
    /// Submitted jobs
    Tasks,
    /// Cached characters
    Characters,
}
