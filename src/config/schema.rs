//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the KDL schema
//! - Parsing from a KDL document
//! - Validation of value ranges

use kdl::{KdlDocument, KdlNode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in config.kdl.
///
/// Every key is optional; unset keys fall back to built-in defaults during
/// resolution.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"  // or "json"
/// data-dir "/home/me/lifekit"
/// strict-updates #true
/// action-log #true
/// default-plan-days 7
/// idea-count 5
/// idea-max-attempts 10000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifekitConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Directory holding the tracker documents
    pub data_dir: Option<PathBuf>,

    /// Reject reading updates that name fields outside the item's kind
    pub strict_updates: Option<bool>,

    /// Append a line to the action log for every command
    pub action_log: Option<bool>,

    /// Days in a generated meal plan when `--days` is not given
    pub default_plan_days: Option<u32>,

    /// Ideas generated when `--count` is not given
    pub idea_count: Option<usize>,

    /// Upper bound on renders per idea generation
    pub idea_max_attempts: Option<usize>,
}

impl LifekitConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_plan_days == Some(0) {
            return Err("default-plan-days must be at least 1".to_string());
        }
        if self.idea_max_attempts == Some(0) {
            return Err("idea-max-attempts must be at least 1".to_string());
        }
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err("data-dir cannot be empty".to_string());
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes are ignored. Known nodes with a value of the wrong type
    /// are an error.
    pub fn from_kdl(doc: &KdlDocument) -> Result<Self, String> {
        let mut config = Self::new();

        if let Some(node) = doc.get("output-format") {
            let s = string_arg(node)?;
            config.output_format = Some(
                OutputFormat::parse(&s)
                    .ok_or_else(|| format!("output-format must be \"json\" or \"human\", got \"{}\"", s))?,
            );
        }

        if let Some(node) = doc.get("data-dir") {
            config.data_dir = Some(PathBuf::from(string_arg(node)?));
        }

        if let Some(node) = doc.get("strict-updates") {
            config.strict_updates = Some(bool_arg(node)?);
        }

        if let Some(node) = doc.get("action-log") {
            config.action_log = Some(bool_arg(node)?);
        }

        if let Some(node) = doc.get("default-plan-days") {
            config.default_plan_days = Some(int_arg(node)?);
        }

        if let Some(node) = doc.get("idea-count") {
            config.idea_count = Some(int_arg(node)?);
        }

        if let Some(node) = doc.get("idea-max-attempts") {
            config.idea_max_attempts = Some(int_arg(node)?);
        }

        Ok(config)
    }
}

fn first_value(node: &KdlNode) -> Result<&kdl::KdlValue, String> {
    node.entries()
        .first()
        .map(|entry| entry.value())
        .ok_or_else(|| format!("{} needs a value", node.name().value()))
}

fn string_arg(node: &KdlNode) -> Result<String, String> {
    first_value(node)?
        .as_string()
        .map(str::to_string)
        .ok_or_else(|| format!("{} must be a string", node.name().value()))
}

fn bool_arg(node: &KdlNode) -> Result<bool, String> {
    first_value(node)?
        .as_bool()
        .ok_or_else(|| format!("{} must be #true or #false", node.name().value()))
}

fn int_arg<T: TryFrom<i128>>(node: &KdlNode) -> Result<T, String> {
    first_value(node)?
        .as_integer()
        .and_then(|i| T::try_from(i).ok())
        .ok_or_else(|| format!("{} must be a non-negative integer", node.name().value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kdl: &str) -> Result<LifekitConfig, String> {
        let doc: KdlDocument = kdl.parse().unwrap();
        LifekitConfig::from_kdl(&doc)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("HUMAN"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("invalid"), None);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::Json), "json");
        assert_eq!(format!("{}", OutputFormat::Human), "human");
    }

    #[test]
    fn test_config_from_kdl_empty() {
        let config = LifekitConfig::from_kdl(&KdlDocument::new()).unwrap();
        assert_eq!(config, LifekitConfig::default());
    }

    #[test]
    fn test_config_from_kdl_full() {
        let config = parse(
            r#"
            output-format "human"
            data-dir "/tmp/lifekit"
            strict-updates #false
            action-log #false
            default-plan-days 5
            idea-count 3
            idea-max-attempts 200
        "#,
        )
        .unwrap();

        assert_eq!(config.output_format, Some(OutputFormat::Human));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/lifekit")));
        assert_eq!(config.strict_updates, Some(false));
        assert_eq!(config.action_log, Some(false));
        assert_eq!(config.default_plan_days, Some(5));
        assert_eq!(config.idea_count, Some(3));
        assert_eq!(config.idea_max_attempts, Some(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_kdl_ignores_unknown_nodes() {
        let config = parse("editor \"nvim\"\nidea-count 2").unwrap();
        assert_eq!(config.idea_count, Some(2));
    }

    #[test]
    fn test_config_from_kdl_wrong_types() {
        assert!(parse("strict-updates \"yes\"").unwrap_err().contains("strict-updates"));
        assert!(parse("default-plan-days -3").unwrap_err().contains("non-negative"));
        assert!(parse("output-format \"xml\"").is_err());
        assert!(parse("idea-count").unwrap_err().contains("needs a value"));
    }

    #[test]
    fn test_config_validate_rejects_zero() {
        let config = LifekitConfig {
            default_plan_days: Some(0),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("default-plan-days"));

        let config = LifekitConfig {
            idea_max_attempts: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
