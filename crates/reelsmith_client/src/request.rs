//! Request bodies.

use crate::instructions_for;
use reelsmith_core::{CharacterCameo, OptimizeMode};
use serde::{Deserialize, Serialize};

/// Chat completion body used for prompt optimization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Instruction followed by the text to rewrite
    pub messages: Vec<Message>,
}

impl ChatCompletionRequest {
    /// Ask `model` to rewrite `text` following the `mode` instructions.
    pub fn optimize(model: impl Into<String>, mode: OptimizeMode, text: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: instructions_for(mode).to_string(),
                },
                Message {
                    role: Role::User,
                    content: text.trim().to_string(),
                },
            ],
        }
    }
}

/// Chat message author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instruction template
    System,
    /// Prompt text
    User,
}

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Message {
    /// Author
    pub role: Role,
    /// Text
    pub content: String,
}

/// Character creation body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterRequest {
    /// Source video URL
    pub url: String,
    /// `start,end` in seconds
    pub timestamps: String,
}

impl CharacterRequest {
    /// Body for a clip of `url` between `start` and `end` seconds.
    pub fn new(url: &str, start: f64, end: f64) -> Self {
        let clip = CharacterCameo::new(url.trim(), start, end);
        Self {
            timestamps: clip.timestamps(),
            url: clip.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optimization_body_has_instruction_then_prompt() {
        let body = ChatCompletionRequest::optimize("gpt-4o-mini", OptimizeMode::Single, "  a fox  ");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1], json!({"role": "user", "content": "a fox"}));
    }

    #[test]
    fn character_body_formats_range() {
        let body = CharacterRequest::new(" https://x/c.mp4 ", 1.5, 4.0);
        assert_eq!(body.url, "https://x/c.mp4");
        assert_eq!(body.timestamps, "1.5,4");
    }
}
