//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment variables (`LK_DATA_DIR`)
//! 3. config.kdl (`<config dir>/lifekit/config.kdl`, or the path in `LK_CONFIG`)
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use kdl::KdlDocument;

use crate::config::{LifekitConfig, OutputFormat};
use crate::storage::default_data_dir;
use crate::{Error, Result};

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "LK_CONFIG";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LK_DATA_DIR";

pub const DEFAULT_PLAN_DAYS: u32 = 7;
pub const DEFAULT_IDEA_COUNT: usize = 5;
pub const DEFAULT_IDEA_MAX_ATTEMPTS: usize = 10_000;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    Config,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::Config => write!(f, "config"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }

    /// Take `configured` from config.kdl if set, else `default`.
    fn from_config(configured: Option<T>, default: T) -> Self {
        match configured {
            Some(value) => Self::new(value, ValueSource::Config),
            None => Self::new(default, ValueSource::Default),
        }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Config file that was consulted, if one exists
    pub config_path: Option<PathBuf>,
    pub output_format: Resolved<OutputFormat>,
    pub data_dir: Resolved<PathBuf>,
    pub strict_updates: Resolved<bool>,
    pub action_log: Resolved<bool>,
    pub default_plan_days: Resolved<u32>,
    pub idea_count: Resolved<usize>,
    pub idea_max_attempts: Resolved<usize>,
}

impl ResolvedConfig {
    pub fn output_format(&self) -> &OutputFormat {
        &self.output_format.value
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir.value
    }

    pub fn strict_updates(&self) -> bool {
        self.strict_updates.value
    }

    pub fn action_log(&self) -> bool {
        self.action_log.value
    }

    pub fn default_plan_days(&self) -> u32 {
        self.default_plan_days.value
    }

    pub fn idea_count(&self) -> usize {
        self.idea_count.value
    }

    pub fn idea_max_attempts(&self) -> usize {
        self.idea_max_attempts.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Data directory override from `--data-dir`
    pub data_dir: Option<PathBuf>,
    /// Output format override from `-H`
    pub output_format: Option<OutputFormat>,
}

impl ConfigOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data directory override.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set output format override.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}

/// Location of config.kdl: `LK_CONFIG` if set, else the platform config dir.
pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::config_dir().map(|dir| dir.join("lifekit").join("config.kdl")),
    }
}

/// Read and validate a config file. A missing file is an empty config.
pub fn read_config(path: &Path) -> Result<LifekitConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file");
        return Ok(LifekitConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let doc: KdlDocument = content
        .parse()
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    let config = LifekitConfig::from_kdl(&doc)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    config
        .validate()
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Resolve configuration from the CLI, the environment and config.kdl.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let path = config_path();
    let file_config = match &path {
        Some(path) => read_config(path)?,
        None => LifekitConfig::default(),
    };
    let env_data_dir = std::env::var_os(DATA_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);

    let mut resolved = resolve(file_config, env_data_dir, overrides)?;
    resolved.config_path = path.filter(|p| p.exists());
    Ok(resolved)
}

/// Apply the precedence chain to already-loaded inputs.
pub fn resolve(
    file_config: LifekitConfig,
    env_data_dir: Option<PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    let output_format = match &overrides.output_format {
        Some(format) => Resolved::new(format.clone(), ValueSource::CliFlag),
        None => Resolved::from_config(file_config.output_format, OutputFormat::Json),
    };

    let data_dir = if let Some(dir) = &overrides.data_dir {
        Resolved::new(dir.clone(), ValueSource::CliFlag)
    } else if let Some(dir) = env_data_dir {
        Resolved::new(dir, ValueSource::EnvVar(DATA_DIR_ENV.to_string()))
    } else if let Some(dir) = file_config.data_dir {
        Resolved::new(dir, ValueSource::Config)
    } else {
        Resolved::new(default_data_dir()?, ValueSource::Default)
    };

    Ok(ResolvedConfig {
        config_path: None,
        output_format,
        data_dir,
        strict_updates: Resolved::from_config(file_config.strict_updates, true),
        action_log: Resolved::from_config(file_config.action_log, true),
        default_plan_days: Resolved::from_config(file_config.default_plan_days, DEFAULT_PLAN_DAYS),
        idea_count: Resolved::from_config(file_config.idea_count, DEFAULT_IDEA_COUNT),
        idea_max_attempts: Resolved::from_config(
            file_config.idea_max_attempts,
            DEFAULT_IDEA_MAX_ATTEMPTS,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_value_source_display() {
        assert_eq!(
            format!("{}", ValueSource::EnvVar("LK_DATA_DIR".to_string())),
            "env:LK_DATA_DIR"
        );
        assert_eq!(format!("{}", ValueSource::Config), "config");
        assert_eq!(format!("{}", ValueSource::CliFlag), "cli");
        assert_eq!(format!("{}", ValueSource::Default), "default");
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve(
            LifekitConfig::default(),
            Some(PathBuf::from("/data")),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(*config.output_format(), OutputFormat::Json);
        assert_eq!(config.output_format.source, ValueSource::Default);
        assert!(config.strict_updates());
        assert!(config.action_log());
        assert_eq!(config.default_plan_days(), 7);
        assert_eq!(config.idea_count(), 5);
        assert_eq!(config.idea_max_attempts(), 10_000);
        assert_eq!(config.idea_max_attempts.source, ValueSource::Default);
    }

    #[test]
    fn test_resolve_from_config_file() {
        let file = LifekitConfig {
            output_format: Some(OutputFormat::Human),
            data_dir: Some(PathBuf::from("/from/config")),
            strict_updates: Some(false),
            default_plan_days: Some(3),
            ..Default::default()
        };
        let config = resolve(file, None, &ConfigOverrides::default()).unwrap();

        assert_eq!(*config.output_format(), OutputFormat::Human);
        assert_eq!(config.output_format.source, ValueSource::Config);
        assert_eq!(config.data_dir(), Path::new("/from/config"));
        assert_eq!(config.data_dir.source, ValueSource::Config);
        assert!(!config.strict_updates());
        assert_eq!(config.default_plan_days(), 3);
        assert_eq!(config.default_plan_days.source, ValueSource::Config);
    }

    #[test]
    fn test_resolve_env_overrides_config() {
        let file = LifekitConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let config = resolve(file, Some(PathBuf::from("/from/env")), &ConfigOverrides::new()).unwrap();

        assert_eq!(config.data_dir(), Path::new("/from/env"));
        assert_eq!(
            config.data_dir.source,
            ValueSource::EnvVar(DATA_DIR_ENV.to_string())
        );
    }

    #[test]
    fn test_resolve_cli_overrides_everything() {
        let file = LifekitConfig {
            output_format: Some(OutputFormat::Json),
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let overrides = ConfigOverrides::new()
            .with_data_dir("/from/cli")
            .with_output_format(OutputFormat::Human);
        let config = resolve(file, Some(PathBuf::from("/from/env")), &overrides).unwrap();

        assert_eq!(config.data_dir(), Path::new("/from/cli"));
        assert_eq!(config.data_dir.source, ValueSource::CliFlag);
        assert_eq!(*config.output_format(), OutputFormat::Human);
        assert_eq!(config.output_format.source, ValueSource::CliFlag);
    }

    #[test]
    fn test_read_config_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = read_config(&dir.path().join("config.kdl")).unwrap();
        assert_eq!(config, LifekitConfig::default());
    }

    #[test]
    fn test_read_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.kdl");
        fs::write(&path, "idea-count 8\naction-log #false\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.idea_count, Some(8));
        assert_eq!(config.action_log, Some(false));
    }

    #[test]
    fn test_read_config_invalid_value_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.kdl");
        fs::write(&path, "default-plan-days 0\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("default-plan-days"));
    }

    #[test]
    fn test_read_config_malformed_kdl() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.kdl");
        fs::write(&path, "idea-count {{{\n").unwrap();

        assert!(matches!(read_config(&path), Err(Error::Config(_))));
    }
}
