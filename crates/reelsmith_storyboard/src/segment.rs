//! Storyboard segment.

use serde::{Deserialize, Serialize};

/// One timed, described unit of a storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Identifier, unique within its storyboard
    pub id: u32,
    /// Duration in whole seconds, at least 1
    pub duration: u32,
    /// Free-text description of the scene
    pub description: String,
}

impl Segment {
    pub(crate) fn new(id: u32, duration: u32) -> Self {
        Self {
            id,
            duration,
            description: String::new(),
        }
    }

    /// Whether the description has any visible text.
    pub fn is_described(&self) -> bool {
        !self.description.trim().is_empty()
    }
}
