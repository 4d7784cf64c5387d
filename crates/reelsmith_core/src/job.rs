//! Job creation parameters.

use crate::{ModelVariant, Orientation, TaskStatus};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Reference image attached to a video job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ReferenceImage {
    /// Inline `data:<mime>;base64,<payload>` URL, uploaded as a file part
    DataUrl(String),
    /// Remote image URL, passed through as a form field
    Url(String),
}

/// Character clip attached to a video job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterCameo {
    /// Source video URL
    pub url: String,
    /// Clip start in seconds
    pub start: f64,
    /// Clip end in seconds
    pub end: f64,
}

impl CharacterCameo {
    /// Create a cameo reference.
    pub fn new(url: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            url: url.into(),
            start,
            end,
        }
    }

    /// The `start,end` range string the remote API expects.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_core::CharacterCameo;
    ///
    /// assert_eq!(CharacterCameo::new("https://x/c.mp4", 1.0, 2.5).timestamps(), "1,2.5");
    /// ```
    pub fn timestamps(&self) -> String {
        format!("{},{}", self.start, self.end)
    }
}

/// Parameters of one video generation job.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{ModelVariant, Orientation, VideoJob};
///
/// let job = VideoJob::builder()
///     .model(ModelVariant::Sora2)
///     .prompt("a paper boat in the rain")
///     .seconds(10u32)
///     .orientation(Orientation::Portrait)
///     .build()
///     .unwrap();
/// assert!(!job.watermark);
/// assert!(job.reference.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct VideoJob {
    /// Model to generate with
    pub model: ModelVariant,
    /// Final prompt text
    pub prompt: String,
    /// Duration in seconds
    pub seconds: u32,
    /// Frame orientation
    pub orientation: Orientation,
    /// Optional reference image
    #[builder(default, setter(into, strip_option))]
    pub reference: Option<ReferenceImage>,
    /// Optional character clip
    #[builder(default, setter(into, strip_option))]
    pub cameo: Option<CharacterCameo>,
    /// Whether the output carries a watermark
    #[builder(default)]
    pub watermark: bool,
}

impl VideoJob {
    /// Creates a new builder for `VideoJob`.
    pub fn builder() -> VideoJobBuilder {
        VideoJobBuilder::default()
    }
}

impl VideoJobBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("prompt must not be empty".to_string());
        }
        if let (Some(model), Some(seconds)) = (self.model, self.seconds) {
            if !model.supports(seconds) {
                return Err(format!("{} does not offer {}s videos", model, seconds));
            }
        }
        Ok(())
    }
}

/// Identifier and initial status returned by job creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    /// Remote job identifier
    pub id: String,
    /// Status at submission time
    pub status: TaskStatus,
}

/// Which instruction template prompt optimization uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OptimizeMode {
    /// One free-form prompt
    #[default]
    Single,
    /// One storyboard segment description
    Segments,
    /// A whole timed script
    Script,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_blank_prompt() {
        let result = VideoJob::builder()
            .model(ModelVariant::Sora2)
            .prompt("   ")
            .seconds(10u32)
            .orientation(Orientation::Landscape)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_rejects_unsupported_duration() {
        let result = VideoJob::builder()
            .model(ModelVariant::Sora2)
            .prompt("a lighthouse")
            .seconds(25u32)
            .orientation(Orientation::Landscape)
            .build();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("25s"), "{err}");
    }

    #[test]
    fn builder_accepts_optional_parts() {
        let job = VideoJob::builder()
            .model(ModelVariant::Sora2Pro)
            .prompt("a lighthouse")
            .seconds(25u32)
            .orientation(Orientation::Landscape)
            .reference(ReferenceImage::Url("https://x/ref.png".to_string()))
            .cameo(CharacterCameo::new("https://x/c.mp4", 0.0, 2.0))
            .watermark(true)
            .build()
            .unwrap();
        assert!(job.watermark);
        assert_eq!(job.cameo.unwrap().timestamps(), "0,2");
    }
}
