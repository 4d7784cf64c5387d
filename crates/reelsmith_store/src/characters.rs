//! Local character cache.

use reelsmith_core::Character;
use serde::{Deserialize, Serialize};

/// Characters created so far, newest first, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterStore {
    characters: Vec<Character>,
}

impl CharacterStore {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// All characters, newest first.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Number of cached characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Look up by id.
    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up by username, with or without the leading `@`.
    pub fn find_by_username(&self, username: &str) -> Option<&Character> {
        let username = username.trim().trim_start_matches('@');
        self.characters
            .iter()
            .find(|c| c.username.eq_ignore_ascii_case(username))
    }

    /// Add a character at the front, replacing any record with the same id.
    pub fn upsert(&mut self, character: Character) {
        self.characters.retain(|c| c.id != character.id);
        self.characters.insert(0, character);
    }

    /// Remove a character.
    pub fn remove(&mut self, id: &str) -> Option<Character> {
        let index = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(index))
    }
}
