//! Common test utilities for lifekit integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real data or config directories.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with isolated data and config.
///
/// Each `TestEnv` creates two temporary directories:
/// - `data_dir`: Holds the tracker documents (via `LK_DATA_DIR`)
/// - `config_dir`: Holds an optional config.kdl (via `LK_CONFIG`)
///
/// The `lk()` method returns a `Command` that sets both variables
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the lk binary with isolated data and config.
    pub fn lk(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_lk"));
        cmd.current_dir(self.config_dir.path());
        cmd.env("LK_DATA_DIR", self.data_dir.path());
        cmd.env("LK_CONFIG", self.config_path());
        cmd.env_remove("LK_LOG");
        cmd
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Path the binary reads config.kdl from.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.kdl")
    }

    /// Write config.kdl for this environment.
    pub fn write_config(&self, kdl: &str) {
        fs::write(self.config_path(), kdl).unwrap();
    }

    /// Read a tracker document as JSON.
    pub fn read_doc(&self, file_name: &str) -> serde_json::Value {
        let content = fs::read_to_string(self.data_path().join(file_name)).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// Run a command that must succeed and parse its JSON stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.lk().args(args).assert().success().get_output().stdout.clone();
        serde_json::from_slice(&output).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
