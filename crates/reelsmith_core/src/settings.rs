//! Connection settings.

use serde::{Deserialize, Serialize};

/// Base URL and API key used by every outbound call.
///
/// # Examples
///
/// ```
/// use reelsmith_core::Settings;
///
/// let settings = Settings::new("https://api.example.com/", "sk-test");
/// assert_eq!(settings.endpoint("/v1/videos"), "https://api.example.com/v1/videos");
/// assert!(settings.is_configured());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the remote API
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
}

impl Settings {
    /// Create settings from a base URL and key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Both values are present.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Join `path` onto the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
