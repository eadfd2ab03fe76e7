use serde::Serialize;
use std::path::Path;

use super::{Output, json, now};
use crate::Result;
use crate::models::{SkillDocument, SkillLog};
use crate::storage::Store;

#[derive(Serialize)]
pub struct SkillAdded {
    pub name: String,
}

impl Output for SkillAdded {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Skill '{}' added.", self.name)
    }
}

pub fn skills_add(data_dir: &Path, name: &str) -> Result<SkillAdded> {
    let store: Store<SkillDocument> = Store::new(data_dir);
    let name = store.mutate(|doc| doc.add(name))?;
    Ok(SkillAdded { name })
}

#[derive(Serialize)]
pub struct SkillLogged {
    pub name: String,
    pub time_spent: f64,
    pub total_time: f64,
}

impl Output for SkillLogged {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Logged {} hours for '{}'. Total: {:.2} hours.",
            self.time_spent, self.name, self.total_time
        )
    }
}

/// Log `hours` of practice on a skill, stamped with the current local time.
pub fn skills_log(data_dir: &Path, name: &str, hours: f64, note: &str) -> Result<SkillLogged> {
    let store: Store<SkillDocument> = Store::new(data_dir);
    let skill = store.mutate(|doc| doc.log(name, hours, note, now()))?;
    Ok(SkillLogged {
        name: name.to_string(),
        time_spent: hours,
        total_time: skill.total_time,
    })
}

#[derive(Serialize)]
pub struct SkillShown {
    pub name: String,
    pub total_time: f64,
    pub logs: Vec<SkillLog>,
}

impl Output for SkillShown {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Skill: {}", self.name),
            format!("Total Time: {:.2} hours", self.total_time),
            "Logs:".to_string(),
        ];
        if self.logs.is_empty() {
            lines.push("  No logs yet.".to_string());
        }
        for log in &self.logs {
            let date = log.date.format("%Y-%m-%d %H:%M:%S");
            if log.note.is_empty() {
                lines.push(format!("  [{}] {:.2} hours", date, log.time_spent));
            } else {
                lines.push(format!("  [{}] {:.2} hours: {}", date, log.time_spent, log.note));
            }
        }
        lines.join("\n")
    }
}

pub fn skills_show(data_dir: &Path, name: &str) -> Result<SkillShown> {
    let store: Store<SkillDocument> = Store::new(data_dir);
    let doc = store.load()?;
    let skill = doc.show(name)?;
    Ok(SkillShown {
        name: name.to_string(),
        total_time: skill.total_time,
        logs: skill.logs.clone(),
    })
}

#[derive(Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub total_time: f64,
}

#[derive(Serialize)]
pub struct SkillList {
    pub skills: Vec<SkillSummary>,
    pub count: usize,
}

impl Output for SkillList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.skills.is_empty() {
            return "No skills tracked yet.".to_string();
        }
        let mut lines = vec![format!("{} tracked skill(s):", self.count)];
        lines.extend(
            self.skills
                .iter()
                .map(|s| format!("- {} (Total: {:.2} hours)", s.name, s.total_time)),
        );
        lines.join("\n")
    }
}

pub fn skills_list(data_dir: &Path) -> Result<SkillList> {
    let store: Store<SkillDocument> = Store::new(data_dir);
    let skills: Vec<SkillSummary> = store
        .load()?
        .list()
        .into_iter()
        .map(|(name, total_time)| SkillSummary { name, total_time })
        .collect();
    Ok(SkillList {
        count: skills.len(),
        skills,
    })
}
