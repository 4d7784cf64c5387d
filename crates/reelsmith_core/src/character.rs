//! Reusable characters.

use serde::{Deserialize, Serialize};

/// A named visual identity created from a reference clip.
///
/// Characters are cached locally and referenced from later prompts by their
/// handle.
///
/// # Examples
///
/// ```
/// use reelsmith_core::Character;
///
/// let character = Character {
///     id: "ch_1".to_string(),
///     username: "moss.cat".to_string(),
///     profile_picture_url: "https://cdn.example/p.png".to_string(),
///     permalink: "https://example/@moss.cat".to_string(),
///     description: None,
/// };
/// assert_eq!(character.handle(), "@moss.cat");
/// assert_eq!(character.mention_in("walks home"), "@moss.cat walks home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Remote identifier
    pub id: String,
    /// Username, used as the prompt handle
    pub username: String,
    /// Avatar image URL
    pub profile_picture_url: String,
    /// Public page URL
    pub permalink: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Character {
    /// The `@username` token used in prompts.
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    /// Prefix `prompt` with this character's handle unless it already mentions it.
    pub fn mention_in(&self, prompt: &str) -> String {
        let handle = self.handle();
        if prompt.contains(&handle) {
            prompt.to_string()
        } else if prompt.trim().is_empty() {
            handle
        } else {
            format!("{} {}", handle, prompt.trim_start())
        }
    }
}
