use serde::Serialize;
use std::path::Path;

use super::{Output, json};
use crate::Result;
use crate::models::{ContentDocument, SavedIdea};
use crate::storage::Store;
use crate::templates;

#[derive(Serialize)]
pub struct TopicAdded {
    pub topic: String,
    /// Whether the generator has keywords for this topic
    pub has_templates: bool,
}

impl Output for TopicAdded {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!("Topic '{}' added.", self.topic);
        if !self.has_templates {
            out.push_str(&format!(
                "\nNo idea templates for '{}' yet, so `ideas generate` will not work for it.",
                self.topic
            ));
        }
        out
    }
}

pub fn ideas_add_topic(data_dir: &Path, topic: &str) -> Result<TopicAdded> {
    let store: Store<ContentDocument> = Store::new(data_dir);
    let topic = store.mutate(|doc| doc.add_topic(topic))?;
    Ok(TopicAdded {
        has_templates: templates::keywords_for(&topic).is_some(),
        topic,
    })
}

#[derive(Serialize)]
pub struct TopicList {
    pub topics: Vec<String>,
    pub count: usize,
}

impl Output for TopicList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.topics.is_empty() {
            return "No topics added yet.".to_string();
        }
        let mut lines = vec![format!("{} topic(s):", self.count)];
        lines.extend(self.topics.iter().map(|t| format!("- {}", t)));
        lines.join("\n")
    }
}

pub fn ideas_list_topics(data_dir: &Path) -> Result<TopicList> {
    let store: Store<ContentDocument> = Store::new(data_dir);
    let topics = store.load()?.topics;
    Ok(TopicList {
        count: topics.len(),
        topics,
    })
}

#[derive(Serialize)]
pub struct IdeasGenerated {
    pub topic: String,
    pub ideas: Vec<String>,
    /// Ideas newly saved with `--save` (already-saved ones are skipped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<Vec<SavedIdea>>,
}

impl Output for IdeasGenerated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!("Ideas for {}:", self.topic)];
        lines.extend(self.ideas.iter().map(|idea| format!("- {}", idea)));
        if let Some(saved) = &self.saved {
            lines.push(format!("Saved {} new idea(s).", saved.len()));
        }
        lines.join("\n")
    }
}

/// Generate ideas for `topic`, optionally saving them.
pub fn ideas_generate(
    data_dir: &Path,
    topic: &str,
    count: usize,
    max_attempts: usize,
    save: bool,
) -> Result<IdeasGenerated> {
    let ideas = templates::generate_ideas(topic, count, max_attempts, &mut rand::thread_rng())?;

    let saved = if save {
        let store: Store<ContentDocument> = Store::new(data_dir);
        Some(store.mutate(|doc| Ok(doc.save_ideas(ideas.iter().map(String::as_str))))?)
    } else {
        None
    };

    Ok(IdeasGenerated {
        topic: topic.to_string(),
        ideas,
        saved,
    })
}

#[derive(Serialize)]
pub struct IdeaResult {
    #[serde(flatten)]
    pub idea: SavedIdea,
    #[serde(skip)]
    action: &'static str,
}

impl Output for IdeaResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "{} idea {}: '{}' [{}]",
            self.action, self.idea.id, self.idea.idea, self.idea.status
        )
    }
}

pub fn ideas_save(data_dir: &Path, text: &str) -> Result<IdeaResult> {
    let store: Store<ContentDocument> = Store::new(data_dir);
    let idea = store.mutate(|doc| doc.save_idea(text))?;
    Ok(IdeaResult {
        idea,
        action: "Saved",
    })
}

pub fn ideas_update(data_dir: &Path, id: u64, status: &str) -> Result<IdeaResult> {
    let store: Store<ContentDocument> = Store::new(data_dir);
    let idea = store.mutate(|doc| doc.set_idea_status(id, status))?;
    Ok(IdeaResult {
        idea,
        action: "Updated",
    })
}

pub fn ideas_delete(data_dir: &Path, id: u64) -> Result<IdeaResult> {
    let store: Store<ContentDocument> = Store::new(data_dir);
    let idea = store.mutate(|doc| doc.delete_idea(id))?;
    Ok(IdeaResult {
        idea,
        action: "Deleted",
    })
}

#[derive(Serialize)]
pub struct IdeaList {
    pub ideas: Vec<SavedIdea>,
    pub count: usize,
}

impl Output for IdeaList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.ideas.is_empty() {
            return "No saved ideas.".to_string();
        }
        let mut lines = vec![format!("{} saved idea(s):", self.count)];
        lines.extend(
            self.ideas
                .iter()
                .map(|idea| format!("[{}] {} ({})", idea.id, idea.idea, idea.status)),
        );
        lines.join("\n")
    }
}

pub fn ideas_list(data_dir: &Path, status: Option<&str>) -> Result<IdeaList> {
    let store: Store<ContentDocument> = Store::new(data_dir);
    let ideas = store.load()?.list_ideas(status);
    Ok(IdeaList {
        count: ideas.len(),
        ideas,
    })
}
