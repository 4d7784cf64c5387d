//! Configuration for reelsmith.
//!
//! Values come from, lowest precedence first:
//! 1. Bundled defaults (`reelsmith.toml` shipped with the library)
//! 2. `~/.config/reelsmith/reelsmith.toml`
//! 3. `./reelsmith.toml`
//! 4. `REELSMITH__<SECTION>__<KEY>` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{
    ApiConfig, BatchConfig, JobsConfig, PollingConfig, ReelsmithConfig, StorageConfig,
};
