//! Data models for Lifekit records.
//!
//! This module defines the document and record types of each tracker:
//! - `ReadingItem` - Books, certifications, articles and quotes with progress
//! - `SavedIdea` - Content ideas kept for later, plus the topic list
//! - `Recipe` / `PlanEntry` - Recipe book and the current meal plan
//! - `Skill` / `SkillLog` - Practice time per skill
//! - `WorkoutLog` - Completed workouts against named routines
//!
//! Name-keyed definitions use [`NamedMap`], which keeps insertion order on disk.

pub mod ideas;
pub mod meals;
mod named_map;
pub mod reading;
pub mod skills;
pub mod workouts;

pub use ideas::{ContentDocument, SavedIdea};
pub use meals::{MealDocument, PlanEntry, Recipe};
pub use named_map::NamedMap;
pub use reading::{
    NewReadingItem, Progress, ReadingArgs, ReadingDetails, ReadingDocument, ReadingField,
    ReadingFilter, ReadingItem, ReadingKind, ReadingUpdate,
};
pub use skills::{Skill, SkillDocument, SkillLog};
pub use workouts::{WorkoutDocument, WorkoutLog, WorkoutStatus};
