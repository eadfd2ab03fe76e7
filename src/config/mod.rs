//! Configuration for Lifekit.
//!
//! ## config.kdl - User preferences
//!
//! Located at `~/.config/lifekit/config.kdl` (platform config dir), or at the
//! path named by `LK_CONFIG`.
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `data-dir` - Directory holding the tracker documents
//! - `strict-updates` - Reject reading updates with fields the item kind lacks
//! - `action-log` - Enable the JSONL action log
//! - `default-plan-days` - Meal plan length when `--days` is omitted
//! - `idea-count` - Ideas generated when `--count` is omitted
//! - `idea-max-attempts` - Render cap for idea generation
//!
//! ## Precedence
//!
//! CLI flag > environment variable > config.kdl > defaults
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    CONFIG_ENV, ConfigOverrides, DATA_DIR_ENV, Resolved, ResolvedConfig, ValueSource,
    config_path, read_config, resolve, resolve_config,
};
pub use schema::{LifekitConfig, OutputFormat};
