//! Skills and practice logs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::NamedMap;

/// A tracked skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Cumulative hours across all logs
    pub total_time: f64,

    #[serde(default)]
    pub logs: Vec<SkillLog>,
}

/// A single practice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLog {
    /// When the session was logged
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,

    /// Hours spent
    pub time_spent: f64,

    #[serde(default)]
    pub note: String,
}

/// The skill tracker document (`skill_tracker.json`), keyed by skill name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillDocument {
    pub skills: NamedMap<Skill>,
}

/// `YYYY-MM-DD HH:MM:SS` timestamps.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_date_format() {
        let json = r#"{"date": "2024-05-01 18:30:00", "time_spent": 1.5, "note": "scales"}"#;
        let log: SkillLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.time_spent, 1.5);

        let out = serde_json::to_value(&log).unwrap();
        assert_eq!(out["date"], "2024-05-01 18:30:00");
    }

    #[test]
    fn test_document_is_top_level_map() {
        let json = r#"{"Guitar": {"total_time": 2.0, "logs": []}, "Piano": {"total_time": 0.0, "logs": []}}"#;
        let doc: SkillDocument = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = doc.skills.names().collect();
        assert_eq!(names, vec!["Guitar", "Piano"]);
    }
}
