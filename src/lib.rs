//! Lifekit - personal productivity trackers backed by local JSON documents.
//!
//! This library provides the core functionality for the `lk` CLI tool:
//! reading items, content ideas, meal plans, skills, workouts and a thin
//! bank balance fetch. Each tracker owns a single JSON document that is
//! loaded whole, edited in memory and rewritten whole.

pub mod action_log;
pub mod bank;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod storage;
pub mod templates;

use std::path::PathBuf;


/// Library-level error type for Lifekit operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Field '{field}' cannot be updated on a {kind} item")]
    UnknownField { field: String, kind: String },

    #[error("No idea templates registered for topic '{0}'")]
    NoTemplates(String),

    #[error("Could only produce {produced} distinct ideas out of {requested} requested")]
    Exhausted { requested: usize, produced: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Result type alias for Lifekit operations.
pub type Result<T> = std::result::Result<T, Error>;
