//! Skill tracker operations.

use chrono::NaiveDateTime;

use super::{Document, validate_name};
use crate::models::{Skill, SkillDocument, SkillLog};
use crate::{Error, Result};

impl Document for SkillDocument {
    const FILE_NAME: &'static str = "skill_tracker.json";
}

impl SkillDocument {
    /// Start tracking a skill with no time logged.
    pub fn add(&mut self, name: &str) -> Result<String> {
        let name = validate_name("Skill", name)?;
        if self.skills.contains(&name) {
            return Err(Error::AlreadyExists(format!(
                "Skill '{}' already exists",
                name
            )));
        }
        self.skills.insert(name.clone(), Skill::default());
        Ok(name)
    }

    /// Log a practice session and add its hours to the skill total.
    pub fn log(
        &mut self,
        name: &str,
        hours: f64,
        note: &str,
        at: NaiveDateTime,
    ) -> Result<Skill> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "Time spent must be a positive number of hours, got {}",
                hours
            )));
        }
        let skill = self.skills.get_mut(name).ok_or_else(|| not_found(name))?;
        skill.logs.push(SkillLog {
            date: at,
            time_spent: hours,
            note: note.to_string(),
        });
        skill.total_time += hours;
        Ok(skill.clone())
    }

    pub fn show(&self, name: &str) -> Result<&Skill> {
        self.skills.get(name).ok_or_else(|| not_found(name))
    }

    /// Skill names with their totals, in insertion order.
    pub fn list(&self) -> Vec<(String, f64)> {
        self.skills
            .iter()
            .map(|(name, skill)| (name.to_string(), skill.total_time))
            .collect()
    }
}

fn not_found(name: &str) -> Error {
    Error::NotFound(format!("Skill '{}' not found", name))
}
