//! Local state for reelsmith: the task list, the character cache, and their
//! persistence as named JSON snapshots.
//!
//! Persistence goes through the [`SnapshotStore`](reelsmith_interface::SnapshotStore)
//! port. [`JsonFileStore`] keeps one file per snapshot; [`MemoryStore`] keeps
//! them in memory. Loading never fails: unreadable or malformed snapshots are
//! logged and replaced by defaults.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod characters;
mod file_store;
mod memory_store;
mod shared;
mod snapshot;
mod tasks;

pub use characters::CharacterStore;
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use shared::SharedTaskStore;
pub use snapshot::{load_snapshot, save_snapshot};
pub use tasks::TaskStore;
