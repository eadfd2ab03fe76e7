//! Reading item operations on the daily reads document.

use chrono::NaiveDate;

use super::{Document, Identified, next_id};
use crate::models::{NewReadingItem, ReadingDocument, ReadingFilter, ReadingItem, ReadingUpdate};
use crate::{Error, Result};

impl Document for ReadingDocument {
    const FILE_NAME: &'static str = "daily_reads.json";
}

impl Identified for ReadingItem {
    fn id(&self) -> u64 {
        self.id
    }
}

impl ReadingDocument {
    /// Add a new item with a fresh id.
    pub fn add(&mut self, new: NewReadingItem, today: NaiveDate) -> ReadingItem {
        let id = next_id(&self.reading_items, self.last_id);
        let item = new.into_item(id, today);
        self.reading_items.push(item.clone());
        item
    }

    /// Apply a partial update to an item.
    ///
    /// See [`ReadingItem::apply`] for how fields outside the kind's schema are treated.
    pub fn update(
        &mut self,
        id: u64,
        update: &ReadingUpdate,
        strict: bool,
        today: NaiveDate,
    ) -> Result<ReadingItem> {
        let item = self
            .reading_items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| not_found(id))?;
        item.apply(update, strict, today)?;
        Ok(item.clone())
    }

    /// Remove the first item with this id.
    pub fn delete(&mut self, id: u64) -> Result<ReadingItem> {
        let pos = self
            .reading_items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.reading_items.remove(pos);
        self.last_id = self.last_id.max(removed.id);
        Ok(removed)
    }

    /// Items matching every supplied filter, in stored order.
    pub fn list(&self, filter: &ReadingFilter) -> Vec<ReadingItem> {
        self.reading_items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }
}

fn not_found(id: u64) -> Error {
    Error::NotFound(format!("Item with ID {} not found", id))
}
