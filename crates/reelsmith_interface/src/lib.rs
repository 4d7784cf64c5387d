//! Trait definitions for reelsmith.
//!
//! The remote generation service and snapshot persistence are ports: the
//! stores, the polling loop, and the facade depend on these traits, and the
//! concrete HTTP client and storage backends implement them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{GenerationApi, SnapshotStore};
pub use types::SnapshotKey;
