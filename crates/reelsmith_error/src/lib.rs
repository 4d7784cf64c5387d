//! Error types for reelsmith.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use reelsmith_error::{ApiError, ApiErrorKind, ReelsmithResult};
//!
//! fn submit() -> ReelsmithResult<String> {
//!     Err(ApiError::new(ApiErrorKind::MissingCredentials("api key".into())))?
//! }
//!
//! match submit() {
//!     Ok(id) => println!("Submitted {}", id),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod storage;
mod storyboard;

pub use api::{ApiError, ApiErrorKind};
pub use config::ConfigError;
pub use error::{ReelsmithError, ReelsmithErrorKind, ReelsmithResult};
pub use storage::{StorageError, StorageErrorKind};
pub use storyboard::{StoryboardError, StoryboardErrorKind};
