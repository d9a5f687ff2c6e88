//! # gzpipe Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout gzpipe. Specific failure
//! kinds live in the `GzpipeError` enum; everything is propagated as
//! `anyhow::Error` so callers can attach context on the way up.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `GzpipeError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The variants map onto the failure classes of the tool:
//! - `Access`: a path could not be inspected or opened (missing source, permissions)
//! - `Pipeline`: the read -> transform -> write chain failed part-way
//! - `NamesExhausted`: every candidate output name was already taken
//! - `Config` / `InvalidPath`: bad configuration or unusable path arguments
//!
//! "Does not exist" while searching for a free output name is *not* an error;
//! it is how the search terminates. See `common::fs::unique`.
//!
//! ## Examples
//!
//! ```rust
//! // Raise a specific error
//! return Err(GzpipeError::Access { path: path.to_path_buf(), source: err })?;
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<GzpipeError>().is_some_and(|ge| matches!(ge, GzpipeError::NamesExhausted { .. })) => {
//!         println!("Directory is full of numbered copies");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The stage of a stream pipeline in which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading bytes from the source file.
    Read,
    /// Encoding or decoding inside the gzip transform (corrupt or truncated input).
    Transform,
    /// Writing, flushing, or closing the destination file.
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Transform => "transform",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Custom error type for gzpipe.
#[derive(Error, Debug)]
pub enum GzpipeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot access '{}'", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Pipeline {stage} stage failed for '{}'", .path.display())]
    Pipeline {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "No free file name for '{}' + '{}' in '{}' after {attempts} attempts",
        .base_name.to_string_lossy(),
        .extension.to_string_lossy(),
        .directory.display()
    )]
    NamesExhausted {
        directory: PathBuf,
        base_name: OsString,
        extension: OsString,
        attempts: u32,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl GzpipeError {
    /// Returns the pipeline stage for `Pipeline` errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            GzpipeError::Pipeline { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
