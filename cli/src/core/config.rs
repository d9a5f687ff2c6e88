//! # gzpipe Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for gzpipe: loading TOML
//! files, merging them, applying command-line overrides, and validating the
//! result before any file is touched.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--level`, `--atomic`, `--max-attempts`), applied by the command handlers
//! 2. An explicit `--config <FILE>` (replaces 3 and 4 when given)
//! 3. Project-specific `.gzpipe.toml` in the current directory or ancestors
//! 4. User-specific `<config dir>/gzpipe/config.toml`
//! 5. Default values defined in the code
//!
//! Each file is read as a `ConfigLayer` whose keys are all optional, so a file
//! overrides exactly the keys it sets, even when it sets them to the default.
//!
//! ## Examples
//!
//! ```toml
//! [compression]
//! level = 9
//! suffix = ".gz"
//! buffer_size = 65536
//! remove_partial = true
//!
//! [naming]
//! max_attempts = 10000
//! atomic_create = false
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let resolver = UniquePathResolver::new(&cfg.naming);
//! ```
//!
use crate::core::error::{GzpipeError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The effective configuration handed to the command handlers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub compression: CompressionConfig,
    pub naming: NamingConfig,
}

/// Settings for the compress/decompress pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Gzip level 0-9. `None` uses the library default.
    pub level: Option<u32>,
    /// Suffix appended to the source extension when compressing.
    pub suffix: String,
    /// Size of the copy buffer between transform and sink.
    pub buffer_size: usize,
    /// Delete the partially written output when a pipeline fails.
    pub remove_partial: bool,
}

/// Settings for unique output-name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Upper bound on candidates tried (`name.ext`, `name_1.ext`, ...).
    pub max_attempts: u32,
    /// Claim the output name with create-new semantics instead of check-then-create.
    ///
    /// With this off, a name found free can still be taken by another writer
    /// before the output is opened; the open then fails with a write error
    /// instead of replacing the other file.
    pub atomic_create: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: None,
            suffix: default_suffix(),
            buffer_size: default_buffer_size(),
            remove_partial: default_remove_partial(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            atomic_create: false,
        }
    }
}

/// One configuration file as written on disk. Every key is optional so a
/// file only overrides what it actually sets.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
struct ConfigLayer {
    #[serde(default)]
    compression: CompressionLayer,
    #[serde(default)]
    naming: NamingLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CompressionLayer {
    level: Option<u32>,
    suffix: Option<String>,
    buffer_size: Option<usize>,
    remove_partial: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct NamingLayer {
    max_attempts: Option<u32>,
    atomic_create: Option<bool>,
}

impl Config {
    /// Overwrites every field the layer sets.
    fn apply(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            compression,
            naming,
        } = layer;
        if let Some(level) = compression.level {
            self.compression.level = Some(level);
        }
        if let Some(suffix) = compression.suffix {
            self.compression.suffix = suffix;
        }
        if let Some(buffer_size) = compression.buffer_size {
            self.compression.buffer_size = buffer_size;
        }
        if let Some(remove_partial) = compression.remove_partial {
            self.compression.remove_partial = remove_partial;
        }
        if let Some(max_attempts) = naming.max_attempts {
            self.naming.max_attempts = max_attempts;
        }
        if let Some(atomic_create) = naming.atomic_create {
            self.naming.atomic_create = atomic_create;
        }
    }
}

fn default_suffix() -> String {
    ".gz".to_string()
}
fn default_buffer_size() -> usize {
    64 * 1024
}
fn default_remove_partial() -> bool {
    true
}
fn default_max_attempts() -> u32 {
    10_000
}

const PROJECT_CONFIG_FILENAME: &str = ".gzpipe.toml";

/// Loads and validates the effective configuration.
///
/// With `explicit` set, only that file is read (it must exist). Otherwise the
/// user file and the nearest project file are merged, project winning.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let merged = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            merge_configs(Some(load_config_from_path(path)?), None)
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config, project_config)
        }
    };
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "gzpipe") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigLayer>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.gzpipe.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the root looking for `.gzpipe.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Applies the layers over the defaults: user first, then project.
fn merge_configs(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let mut merged = Config::default();
    for layer in [user, project].into_iter().flatten() {
        merged.apply(layer);
    }
    merged
}

/// Checks the values that would otherwise fail deep inside a pipeline.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating configuration...");
    if let Some(level) = config.compression.level {
        if level > 9 {
            return Err(anyhow!(GzpipeError::Config(format!(
                "Invalid compression level {}. Expected 0-9.",
                level
            ))));
        }
    }
    let suffix = &config.compression.suffix;
    if suffix.is_empty() {
        return Err(anyhow!(GzpipeError::Config(
            "Compression suffix cannot be empty.".to_string()
        )));
    }
    if suffix.contains('/') || suffix.contains(std::path::MAIN_SEPARATOR) {
        return Err(anyhow!(GzpipeError::Config(format!(
            "Compression suffix '{}' must not contain a path separator.",
            suffix
        ))));
    }
    if config.compression.buffer_size == 0 {
        return Err(anyhow!(GzpipeError::Config(
            "buffer_size must be greater than zero.".to_string()
        )));
    }
    if config.naming.max_attempts == 0 {
        return Err(anyhow!(GzpipeError::Config(
            "max_attempts must be greater than zero.".to_string()
        )));
    }
    Ok(())
}
