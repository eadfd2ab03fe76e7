//! Storage layer for Lifekit data.
//!
//! Every tracker persists one JSON document in the data directory:
//!
//! - `daily_reads.json` - reading items
//! - `content_data.json` - content topics and saved ideas
//! - `meal_data.json` - recipes and the current meal plan
//! - `skill_tracker.json` - skills and practice logs
//! - `workout_data.json` - workout routines and the workout log
//!
//! A command loads the whole document, applies one operation in memory and,
//! for mutations, rewrites the whole document. There is no locking: two
//! processes writing the same document race and the last writer wins.

pub mod ideas;
pub mod meals;
pub mod reading;
pub mod skills;
pub mod workouts;

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A JSON document owned by one tracker.
pub trait Document: Default + Serialize + DeserializeOwned {
    /// File name of the document inside the data directory.
    const FILE_NAME: &'static str;
}

/// A record with a numeric id.
pub trait Identified {
    fn id(&self) -> u64;
}

/// Next id for a collection: one more than the highest id in use or ever deleted.
pub fn next_id<T: Identified>(records: &[T], last_id: u64) -> u64 {
    records
        .iter()
        .map(Identified::id)
        .chain(std::iter::once(last_id))
        .max()
        .unwrap_or(0)
        + 1
}

/// Whole-document store for one tracker.
pub struct Store<D> {
    path: PathBuf,
    _document: PhantomData<D>,
}

impl<D: Document> Store<D> {
    /// Create a store for `D` inside `data_dir`. Nothing is touched on disk.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(D::FILE_NAME),
            _document: PhantomData,
        }
    }

    /// Path of the document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the document file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the document.
    ///
    /// A missing or blank file yields an empty document. A file that is not
    /// valid JSON for `D` fails with [`Error::Parse`].
    pub fn load(&self) -> Result<D> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "document missing, using empty");
            return Ok(D::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %self.path.display(), "document blank, using empty");
            return Ok(D::default());
        }

        serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the document with a pretty-printed snapshot.
    ///
    /// The snapshot is written to a temporary file next to the target and
    /// then renamed over it. An existing document keeps its permissions.
    pub fn save(&self, document: &D) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut file, document)?;
        writeln!(file)?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            file.as_file().set_permissions(metadata.permissions())?;
        }
        file.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), "document saved");
        Ok(())
    }

    /// Load, apply `op`, and save only if `op` succeeded.
    pub fn mutate<T>(&self, op: impl FnOnce(&mut D) -> Result<T>) -> Result<T> {
        let mut document = self.load()?;
        let value = op(&mut document)?;
        self.save(&document)?;
        Ok(value)
    }
}

/// Default data directory: `<platform data dir>/lifekit`.
pub fn default_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("lifekit"))
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject blank names for name-keyed definitions.
///
/// Names are exact keys: the accepted name is stored and looked up as given.
pub fn validate_name(kind: &str, name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} name cannot be empty", kind)));
    }
    Ok(name.to_string())
}
