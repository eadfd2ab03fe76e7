//! Content topics and saved ideas.

use serde::{Deserialize, Serialize};

use super::reading::is_zero;

/// Status given to an idea when it is saved.
pub const SAVED_STATUS: &str = "saved";

/// A saved content idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedIdea {
    /// Unique identifier, assigned as max existing + 1
    pub id: u64,

    /// Full idea text (unique by exact match)
    pub idea: String,

    /// Free-form status ("saved", "drafted", "published", ...)
    pub status: String,
}

impl SavedIdea {
    pub fn new(id: u64, idea: String) -> Self {
        Self {
            id,
            idea,
            status: SAVED_STATUS.to_string(),
        }
    }
}

/// The content ideas document (`content_data.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub saved_ideas: Vec<SavedIdea>,

    /// Highest id ever deleted, so deleted ids are never issued again
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_id: u64,
}
