//! Response bodies.
//!
//! Only the fields the client reads are modeled; everything else is ignored.

use reelsmith_core::Character;
use serde::{Deserialize, Serialize};

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.trim())
            .filter(|content| !content.is_empty())
    }
}

/// A completion choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Assistant message
    pub message: ChoiceMessage,
}

/// Message within a choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    /// Message content
    #[serde(default)]
    pub content: String,
}

/// Video job creation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateVideoResponse {
    /// Remote job identifier
    #[serde(alias = "task_id")]
    pub id: String,
    /// Initial remote status
    #[serde(default)]
    pub status: Option<String>,
}

/// Character creation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCharacterResponse {
    /// Remote identifier
    pub id: String,
    /// Username used as the prompt handle
    pub username: String,
    /// Avatar image URL
    #[serde(default)]
    pub profile_picture_url: String,
    /// Public page URL
    #[serde(default)]
    pub permalink: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateCharacterResponse> for Character {
    fn from(response: CreateCharacterResponse) -> Self {
        Character {
            id: response.id,
            username: response.username,
            profile_picture_url: response.profile_picture_url,
            permalink: response.permalink,
            description: response.description.filter(|d| !d.trim().is_empty()),
        }
    }
}
