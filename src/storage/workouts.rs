//! Workout routine definitions, the workout log and trailing-window counts.

use chrono::{Days, NaiveDate};

use super::{Document, validate_name};
use crate::models::{WorkoutDocument, WorkoutLog, WorkoutStatus};
use crate::{Error, Result};

impl Document for WorkoutDocument {
    const FILE_NAME: &'static str = "workout_data.json";
}

impl WorkoutDocument {
    /// Define a routine. Names are unique.
    pub fn define(&mut self, name: &str, exercises: Vec<String>) -> Result<(String, Vec<String>)> {
        let name = validate_name("Workout", name)?;
        if self.workouts.contains(&name) {
            return Err(Error::AlreadyExists(format!(
                "Workout '{}' already exists",
                name
            )));
        }
        if exercises.is_empty() {
            return Err(Error::InvalidInput(format!(
                "Workout '{}' needs at least one exercise",
                name
            )));
        }
        self.workouts.insert(name.clone(), exercises.clone());
        Ok((name, exercises))
    }

    /// Record a completed workout. The routine must be defined.
    pub fn log(&mut self, name: &str, date: NaiveDate) -> Result<WorkoutLog> {
        if !self.workouts.contains(name) {
            return Err(Error::NotFound(format!(
                "Workout '{}' not found. Please define it first.",
                name
            )));
        }
        let entry = WorkoutLog {
            date,
            workout_name: name.to_string(),
        };
        self.logs.push(entry.clone());
        Ok(entry)
    }

    /// Log entries, newest first. Entries on the same date keep their logged order.
    pub fn history(&self) -> Vec<WorkoutLog> {
        let mut logs = self.logs.clone();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    /// Count workouts strictly after `today - 7 days` and `today - 30 days`.
    pub fn status(&self, today: NaiveDate) -> WorkoutStatus {
        let count_since = |days: u64| {
            let cutoff = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
            self.logs.iter().filter(|log| log.date > cutoff).count()
        };
        WorkoutStatus {
            last_7_days: count_since(7),
            last_30_days: count_since(30),
        }
    }

    /// Routines with their exercises, in definition order.
    pub fn list(&self) -> Vec<(String, Vec<String>)> {
        self.workouts
            .iter()
            .map(|(name, exercises)| (name.to_string(), exercises.clone()))
            .collect()
    }
}
