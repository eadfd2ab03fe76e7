use serde::Serialize;
use std::path::Path;

use super::{Output, json, today};
use crate::Result;
use crate::models::{
    NewReadingItem, ReadingArgs, ReadingDocument, ReadingFilter, ReadingItem, ReadingKind,
    ReadingUpdate,
};
use crate::storage::Store;

#[derive(Serialize)]
pub struct ReadingAdded {
    #[serde(flatten)]
    pub item: ReadingItem,
}

impl Output for ReadingAdded {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Added new {}: '{}' with ID {}",
            self.item.kind,
            self.item.display_title(),
            self.item.id
        )
    }
}

/// Add a reading item of `kind`.
pub fn reads_add(data_dir: &Path, kind: ReadingKind, args: ReadingArgs) -> Result<ReadingAdded> {
    let new = NewReadingItem::build(kind, args)?;
    let store: Store<ReadingDocument> = Store::new(data_dir);
    let item = store.mutate(|doc| Ok(doc.add(new, today())))?;
    Ok(ReadingAdded { item })
}

#[derive(Serialize)]
pub struct ReadingUpdated {
    #[serde(flatten)]
    pub item: ReadingItem,
}

impl Output for ReadingUpdated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Updated item ID {}.", self.item.id)
    }
}

/// Apply a partial update to a reading item.
pub fn reads_update(
    data_dir: &Path,
    id: u64,
    args: ReadingArgs,
    strict: bool,
) -> Result<ReadingUpdated> {
    let update = ReadingUpdate::from(args);
    if update.is_empty() {
        tracing::warn!(id, "no fields supplied, only last_updated changes");
    }
    let store: Store<ReadingDocument> = Store::new(data_dir);
    let item = store.mutate(|doc| doc.update(id, &update, strict, today()))?;
    Ok(ReadingUpdated { item })
}

#[derive(Serialize)]
pub struct ReadingDeleted {
    pub id: u64,
    pub title: String,
}

impl Output for ReadingDeleted {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Deleted item ID {}.", self.id)
    }
}

pub fn reads_delete(data_dir: &Path, id: u64) -> Result<ReadingDeleted> {
    let store: Store<ReadingDocument> = Store::new(data_dir);
    let removed = store.mutate(|doc| doc.delete(id))?;
    Ok(ReadingDeleted {
        id: removed.id,
        title: removed.display_title().to_string(),
    })
}

#[derive(Serialize)]
pub struct ReadingList {
    pub items: Vec<ReadingItem>,
    pub count: usize,
}

impl Output for ReadingList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return "No reading items found matching criteria.".to_string();
        }

        let mut lines = vec![format!("{} reading item(s):", self.count), String::new()];
        for item in &self.items {
            lines.push(format!("[{}] {} ({})", item.id, item.display_title(), item.kind));
            if let Some(author) = &item.author {
                lines.push(format!("  Author: {}", author));
            }
            if let Some(source) = &item.source {
                lines.push(format!("  Source: {}", source));
            }
            if let Some(unit) = &item.progress_unit {
                lines.push(format!(
                    "  Progress: {} {unit}(s) / {} {unit}(s)",
                    item.current_progress.unwrap_or(0),
                    item.total_progress
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "?".to_string()),
                ));
            }
            lines.push(format!("  Status: {}", item.status));
            if !item.tags.is_empty() {
                lines.push(format!("  Tags: {}", item.tags.join(", ")));
            }
            if let Some(link) = &item.link {
                lines.push(format!("  Link: {}", link));
            }
            if let Some(date) = item.target_completion_date {
                lines.push(format!("  Target Completion: {}", date));
            }
            lines.push(format!("  Last Updated: {}", item.last_updated));
        }
        lines.join("\n")
    }
}

pub fn reads_list(data_dir: &Path, filter: &ReadingFilter) -> Result<ReadingList> {
    let store: Store<ReadingDocument> = Store::new(data_dir);
    let items = store.load()?.list(filter);
    Ok(ReadingList {
        count: items.len(),
        items,
    })
}
