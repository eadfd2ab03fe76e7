//! Workout routines and the workout log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NamedMap;

/// A completed workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub date: NaiveDate,
    pub workout_name: String,
}

/// Workout counts over trailing windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkoutStatus {
    pub last_7_days: usize,
    pub last_30_days: usize,
}

/// The workout tracker document (`workout_data.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDocument {
    /// Routine name to ordered exercise names
    #[serde(default)]
    pub workouts: NamedMap<Vec<String>>,

    #[serde(default)]
    pub logs: Vec<WorkoutLog>,
}
