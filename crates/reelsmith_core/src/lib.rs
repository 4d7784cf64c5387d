//! Core data types for reelsmith.
//!
//! Tasks, characters, settings, job parameters, and the normalized status
//! report shared by the API client, the stores, and the polling loop.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod job;
mod model;
mod settings;
mod status;
mod task;
mod telemetry;

pub use character::Character;
pub use job::{
    CharacterCameo, JobHandle, OptimizeMode, ReferenceImage, VideoJob, VideoJobBuilder,
    VideoJobBuilderError,
};
pub use model::{ModelVariant, Orientation};
pub use settings::Settings;
pub use status::TaskStatus;
pub use task::{StatusReport, Task};
pub use telemetry::{init_telemetry, shutdown_telemetry};
