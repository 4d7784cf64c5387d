//! Reelsmith - video generation client
//!
//! Compose prompts, submit video-generation and character-creation jobs to a
//! remote generative-media API, and track them to completion by polling.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reelsmith::{init_telemetry, ReelsmithConfig, Studio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry()?;
//!     let studio = Studio::open(ReelsmithConfig::load()?).await?;
//!
//!     let job = studio.job("a paper boat drifting down a rainy street").build()?;
//!     let task = studio.submit_video(job).await?;
//!     println!("submitted {}", task.id());
//!
//!     let poller = studio.start_polling();
//!     // ... later
//!     poller.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `reelsmith_error` - Error types
//! - `reelsmith_core` - Tasks, characters, settings, job parameters, telemetry
//! - `reelsmith_interface` - `GenerationApi` and `SnapshotStore` ports
//! - `reelsmith_config` - Layered configuration
//! - `reelsmith_storyboard` - Storyboard timing reconciliation
//! - `reelsmith_client` - HTTP client for the remote API
//! - `reelsmith_store` - Task list, character cache, snapshot persistence
//! - `reelsmith_poller` - Polling reconciliation loop
//!
//! This crate (`reelsmith`) re-exports everything and adds [`Studio`], the
//! application state object tying them together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod studio;

pub use batch::{BatchFailure, BatchOutcome};
pub use studio::Studio;

pub use reelsmith_client::ApiClient;
pub use reelsmith_config::*;
pub use reelsmith_core::*;
pub use reelsmith_error::*;
pub use reelsmith_interface::*;
pub use reelsmith_poller::{PollConfig, Poller, PollerHandle, TickSummary};
pub use reelsmith_store::{
    CharacterStore, JsonFileStore, MemoryStore, SharedTaskStore, TaskStore,
};
pub use reelsmith_storyboard::{Segment, Storyboard, StoryboardView, TimedLine};
