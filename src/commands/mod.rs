//! Command implementations for the Lifekit CLI.
//!
//! This module contains the logic behind each CLI command. Commands are
//! organized by tracker:
//! - `reads` - Reading item CRUD
//! - `ideas` - Topics, idea generation and saved ideas
//! - `meals` - Recipes, meal plans and shopping lists
//! - `skills` - Skill time tracking
//! - `workouts` - Workout routines, log and status
//! - `bank` - Plaid account balances
//! - `config` - Resolved configuration
//!
//! Every command returns a value implementing [`Output`], rendered as JSON by
//! default or as human-readable text with `-H`.

mod bank;
mod config;
mod ideas;
mod meals;
mod reads;
mod skills;
mod workouts;

pub use bank::*;
pub use config::*;
pub use ideas::*;
pub use meals::*;
pub use reads::*;
pub use skills::*;
pub use workouts::*;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Compact JSON for a command result.
fn json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

/// Local calendar date.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local wall-clock time, truncated to whole seconds.
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
