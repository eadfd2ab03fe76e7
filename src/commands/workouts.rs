use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

use super::{Output, json, today};
use crate::Result;
use crate::models::{WorkoutDocument, WorkoutLog, WorkoutStatus};
use crate::storage::{Store, split_list};

#[derive(Serialize)]
pub struct WorkoutEntry {
    pub name: String,
    pub exercises: Vec<String>,
}

impl Output for WorkoutEntry {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Workout '{}' defined with exercises: {}",
            self.name,
            self.exercises.join(", ")
        )
    }
}

/// Define a routine from a comma-separated exercise list.
pub fn workouts_define(data_dir: &Path, name: &str, exercises: &str) -> Result<WorkoutEntry> {
    let exercises = split_list(exercises);
    let store: Store<WorkoutDocument> = Store::new(data_dir);
    let (name, exercises) = store.mutate(|doc| doc.define(name, exercises))?;
    Ok(WorkoutEntry { name, exercises })
}

#[derive(Serialize)]
pub struct WorkoutLogged {
    #[serde(flatten)]
    pub log: WorkoutLog,
}

impl Output for WorkoutLogged {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Logged '{}' for {}.", self.log.workout_name, self.log.date)
    }
}

/// Log a workout on `date`, defaulting to today.
pub fn workouts_log(data_dir: &Path, name: &str, date: Option<NaiveDate>) -> Result<WorkoutLogged> {
    let date = date.unwrap_or_else(today);
    let store: Store<WorkoutDocument> = Store::new(data_dir);
    let log = store.mutate(|doc| doc.log(name, date))?;
    Ok(WorkoutLogged { log })
}

#[derive(Serialize)]
pub struct WorkoutHistory {
    pub logs: Vec<WorkoutLog>,
    pub count: usize,
}

impl Output for WorkoutHistory {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.logs.is_empty() {
            return "No workouts logged yet.".to_string();
        }
        let mut lines = vec!["Workout history:".to_string()];
        lines.extend(
            self.logs
                .iter()
                .map(|log| format!("- {}: {}", log.date, log.workout_name)),
        );
        lines.join("\n")
    }
}

pub fn workouts_history(data_dir: &Path) -> Result<WorkoutHistory> {
    let store: Store<WorkoutDocument> = Store::new(data_dir);
    let logs = store.load()?.history();
    Ok(WorkoutHistory {
        count: logs.len(),
        logs,
    })
}

#[derive(Serialize)]
pub struct WorkoutStatusReport {
    pub today: NaiveDate,
    #[serde(flatten)]
    pub status: WorkoutStatus,
}

impl Output for WorkoutStatusReport {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Workouts in the last 7 days: {}\nWorkouts in the last 30 days: {}",
            self.status.last_7_days, self.status.last_30_days
        )
    }
}

pub fn workouts_status(data_dir: &Path) -> Result<WorkoutStatusReport> {
    let store: Store<WorkoutDocument> = Store::new(data_dir);
    let today = today();
    let status = store.load()?.status(today);
    Ok(WorkoutStatusReport { today, status })
}

#[derive(Serialize)]
pub struct WorkoutList {
    pub workouts: Vec<WorkoutEntry>,
    pub count: usize,
}

impl Output for WorkoutList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.workouts.is_empty() {
            return "No workouts defined yet.".to_string();
        }
        let mut lines = vec![format!("{} workout(s):", self.count)];
        lines.extend(
            self.workouts
                .iter()
                .map(|w| format!("- {}: {}", w.name, w.exercises.join(", "))),
        );
        lines.join("\n")
    }
}

pub fn workouts_list(data_dir: &Path) -> Result<WorkoutList> {
    let store: Store<WorkoutDocument> = Store::new(data_dir);
    let workouts: Vec<WorkoutEntry> = store
        .load()?
        .list()
        .into_iter()
        .map(|(name, exercises)| WorkoutEntry { name, exercises })
        .collect();
    Ok(WorkoutList {
        count: workouts.len(),
        workouts,
    })
}
