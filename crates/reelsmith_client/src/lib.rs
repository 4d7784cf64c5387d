//! Client for the remote video generation API.
//!
//! Wraps prompt optimization, video job creation, character creation, and
//! job status queries. Every failure is translated into an
//! [`ApiError`](reelsmith_error::ApiError) carrying a human-readable message:
//! 404 responses point at the base URL setting, other error responses surface
//! the message found in the body, and transport failures become a
//! connectivity hint.
//!
//! # Example
//!
//! ```no_run
//! use reelsmith_client::ApiClient;
//! use reelsmith_core::Settings;
//! use reelsmith_interface::GenerationApi;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new()?;
//! let settings = Settings::new("https://api.openai.com", "sk-...");
//! let report = client.query_status(&settings, "video_123").await?;
//! println!("{}", report.status);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod data_url;
mod errors;
mod metrics;
mod request;
mod response;
mod status;
mod templates;

pub use client::{ApiClient, DEFAULT_OPTIMIZER_MODEL, DEFAULT_TIMEOUT};
pub use data_url::{decode_data_url, InlineImage};
pub use errors::{extract_error_message, translate_status, translate_transport};
pub use metrics::{classify_error, ApiMetrics};
pub use request::{CharacterRequest, ChatCompletionRequest, Message, Role};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, CreateCharacterResponse, CreateVideoResponse};
pub use status::{normalize_status, ErrorField, Numeric, OneOrMany, StatusFields, StatusResponse, Timestamp};
pub use templates::instructions_for;
