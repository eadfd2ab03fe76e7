use serde::Serialize;
use std::path::PathBuf;

use super::{Output, json};
use crate::config::{Resolved, ResolvedConfig};

#[derive(Serialize)]
pub struct ConfigValue {
    pub key: &'static str,
    pub value: String,
    pub source: String,
}

impl ConfigValue {
    fn new<T: ToString>(key: &'static str, resolved: &Resolved<T>) -> Self {
        Self {
            key,
            value: resolved.value.to_string(),
            source: resolved.source.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ConfigShown {
    pub config_path: Option<PathBuf>,
    pub values: Vec<ConfigValue>,
}

impl Output for ConfigShown {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![match &self.config_path {
            Some(path) => format!("Config file: {}", path.display()),
            None => "Config file: (none)".to_string(),
        }];
        lines.extend(
            self.values
                .iter()
                .map(|v| format!("{} = {} ({})", v.key, v.value, v.source)),
        );
        lines.join("\n")
    }
}

/// Resolved configuration values with their sources.
pub fn config_show(config: &ResolvedConfig) -> ConfigShown {
    let data_dir = Resolved::new(
        config.data_dir.value.display().to_string(),
        config.data_dir.source.clone(),
    );
    ConfigShown {
        config_path: config.config_path.clone(),
        values: vec![
            ConfigValue::new("output-format", &config.output_format),
            ConfigValue::new("data-dir", &data_dir),
            ConfigValue::new("strict-updates", &config.strict_updates),
            ConfigValue::new("action-log", &config.action_log),
            ConfigValue::new("default-plan-days", &config.default_plan_days),
            ConfigValue::new("idea-count", &config.idea_count),
            ConfigValue::new("idea-max-attempts", &config.idea_max_attempts),
        ],
    }
}
