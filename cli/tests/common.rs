//! # gzpipe CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs the
//! compiled `gzpipe` binary inside its own temporary working directory with an
//! explicit configuration file, so user or project configuration on the host
//! machine never leaks into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get gzpipe Command (`gzpipe_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `gzpipe` binary.
///
/// ## Panics
/// Panics if the `gzpipe` binary cannot be found via `Command::cargo_bin`.
pub fn gzpipe_cmd() -> Command {
    Command::cargo_bin("gzpipe").expect("Failed to find gzpipe binary for testing")
}

/// A scratch working directory plus an isolated config file.
pub struct Sandbox {
    work: TempDir,
    config_dir: TempDir,
}

impl Sandbox {
    /// Sandbox with an empty (all defaults) configuration.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Sandbox whose config file contains `toml`.
    pub fn with_config(toml: &str) -> Self {
        let work = tempfile::tempdir().expect("create work dir");
        let config_dir = tempfile::tempdir().expect("create config dir");
        fs::write(config_dir.path().join("gzpipe.toml"), toml).expect("write config");
        Self { work, config_dir }
    }

    pub fn path(&self) -> &Path {
        self.work.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.work.path().join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// `gzpipe --config <sandbox config>` running inside the work directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = gzpipe_cmd();
        cmd.current_dir(self.work.path())
            .env_remove("GZPIPE_LEVEL")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_dir.path().join("gzpipe.toml"));
        cmd
    }

    /// Names of the entries in the work directory, sorted.
    pub fn listing(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.work.path())
            .expect("read work dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Stdout of a successful run, trimmed, as a path.
pub fn stdout_path(output: &std::process::Output) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&output.stdout).trim())
}
