//! Topic and saved-idea operations on the content document.

use super::{Document, Identified, next_id};
use crate::models::{ContentDocument, SavedIdea};
use crate::{Error, Result};

impl Document for ContentDocument {
    const FILE_NAME: &'static str = "content_data.json";
}

impl Identified for SavedIdea {
    fn id(&self) -> u64 {
        self.id
    }
}

impl ContentDocument {
    /// Register a topic. Exact duplicates are rejected.
    pub fn add_topic(&mut self, topic: &str) -> Result<String> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::InvalidInput("Topic cannot be empty".to_string()));
        }
        if self.topics.iter().any(|t| t == topic) {
            return Err(Error::AlreadyExists(format!(
                "Topic '{}' already exists",
                topic
            )));
        }
        self.topics.push(topic.to_string());
        Ok(topic.to_string())
    }

    /// Save an idea with a fresh id. Exact duplicates are rejected.
    pub fn save_idea(&mut self, text: &str) -> Result<SavedIdea> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("Idea text cannot be empty".to_string()));
        }
        if self.saved_ideas.iter().any(|idea| idea.idea == text) {
            return Err(Error::AlreadyExists(
                "This idea is already saved".to_string(),
            ));
        }
        let idea = SavedIdea::new(next_id(&self.saved_ideas, self.last_id), text.to_string());
        self.saved_ideas.push(idea.clone());
        Ok(idea)
    }

    /// Save several ideas, skipping ones already saved.
    pub fn save_ideas<'a>(&mut self, texts: impl IntoIterator<Item = &'a str>) -> Vec<SavedIdea> {
        texts
            .into_iter()
            .filter_map(|text| self.save_idea(text).ok())
            .collect()
    }

    /// Change the status of a saved idea.
    pub fn set_idea_status(&mut self, id: u64, status: &str) -> Result<SavedIdea> {
        let idea = self
            .saved_ideas
            .iter_mut()
            .find(|idea| idea.id == id)
            .ok_or_else(|| not_found(id))?;
        idea.status = status.to_string();
        Ok(idea.clone())
    }

    /// Remove the first saved idea with this id.
    pub fn delete_idea(&mut self, id: u64) -> Result<SavedIdea> {
        let pos = self
            .saved_ideas
            .iter()
            .position(|idea| idea.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.saved_ideas.remove(pos);
        self.last_id = self.last_id.max(removed.id);
        Ok(removed)
    }

    /// Saved ideas, optionally filtered by status, in stored order.
    pub fn list_ideas(&self, status: Option<&str>) -> Vec<SavedIdea> {
        self.saved_ideas
            .iter()
            .filter(|idea| status.is_none_or(|s| idea.status == s))
            .cloned()
            .collect()
    }
}

fn not_found(id: u64) -> Error {
    Error::NotFound(format!("Idea with ID {} not found", id))
}
