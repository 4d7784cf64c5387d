//! Model variants and orientation.

use serde::{Deserialize, Serialize};

/// Remote video model.
///
/// The model determines which video durations may be requested, and so the
/// target duration of a storyboard.
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
    strum::EnumIter,
)]
pub enum ModelVariant {
    /// Standard model
    #[default]
    #[serde(rename = "sora-2")]
    #[strum(serialize = "sora-2")]
    Sora2,
    /// Higher quality model with longer clips
    #[serde(rename = "sora-2-pro")]
    #[strum(serialize = "sora-2-pro")]
    Sora2Pro,
}

impl ModelVariant {
    /// Video durations, in seconds, this model accepts.
    pub fn durations(self) -> &'static [u32] {
        match self {
            ModelVariant::Sora2 => &[10, 15],
            ModelVariant::Sora2Pro => &[10, 15, 25],
        }
    }

    /// Whether `seconds` is a duration this model accepts.
    pub fn supports(self, seconds: u32) -> bool {
        self.durations().contains(&seconds)
    }
}

/// Output frame orientation.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Wide frame
    #[default]
    Landscape,
    /// Tall frame
    Portrait,
}

impl Orientation {
    /// Size code sent with job creation.
    pub fn size_code(self) -> &'static str {
        match self {
            Orientation::Landscape => "1280x720",
            Orientation::Portrait => "720x1280",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names_match_remote_identifiers() {
        assert_eq!(ModelVariant::Sora2.to_string(), "sora-2");
        assert_eq!("sora-2-pro".parse::<ModelVariant>().unwrap(), ModelVariant::Sora2Pro);
        assert_eq!(
            serde_json::to_string(&ModelVariant::Sora2Pro).unwrap(),
            "\"sora-2-pro\""
        );
    }

    #[test]
    fn pro_offers_longer_clips() {
        assert!(!ModelVariant::Sora2.supports(25));
        assert!(ModelVariant::Sora2Pro.supports(25));
        assert!(ModelVariant::Sora2.supports(10));
    }

    #[test]
    fn orientation_size_codes() {
        assert_eq!(Orientation::Landscape.size_code(), "1280x720");
        assert_eq!(Orientation::Portrait.size_code(), "720x1280");
    }
}
