//! # gzpipe Unique Output Paths
//!
//! File: cli/src/common/fs/unique.rs
//!
//! ## Overview
//!
//! Picks an output path that does not collide with an existing file. Given a
//! directory, base name, and extension the candidates are
//!
//! ```text
//! dir/name.ext, dir/name_1.ext, dir/name_2.ext, ...
//! ```
//!
//! and the first one that is free wins.
//!
//! ## Architecture
//!
//! - **`Candidates`**: A lazy iterator over candidate paths, bounded by a maximum
//!   attempt count. Cloning it restarts the sequence from wherever the clone was taken.
//! - **`UniquePathResolver`**: Walks the candidates against the filesystem.
//!   - `resolve` only *checks* existence. Nothing is created, so two calls in a row
//!     return the same path, and a concurrent writer can still take the name
//!     between the check and the create.
//!   - `claim` creates the candidate with create-new semantics and hands back the
//!     open file, so the name cannot be taken by anyone else.
//!
//! Running out of candidates is reported as `GzpipeError::NamesExhausted`.
//!
//! ## Usage
//!
//! ```rust
//! let resolver = UniquePathResolver::new(&config.naming);
//! let path = resolver.resolve(Path::new("logs"), OsStr::new("app"), OsStr::new(".log.gz")).await?;
//! ```
//!
use crate::common::fs::io;
use crate::core::config::NamingConfig;
use crate::core::error::{GzpipeError, Result};
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tracing::{debug, error};

/// Builds `base_name[_n]extension`; `n == 0` means no suffix.
fn candidate_name(base_name: &OsStr, extension: &OsStr, n: u32) -> OsString {
    let mut name = OsString::from(base_name);
    if n > 0 {
        name.push(format!("_{}", n));
    }
    name.push(extension);
    name
}

/// Lazy, bounded sequence of candidate output paths.
#[derive(Debug, Clone)]
pub struct Candidates {
    directory: PathBuf,
    base_name: OsString,
    extension: OsString,
    next: u32,
    limit: u32,
}

impl Candidates {
    pub fn new(directory: &Path, base_name: &OsStr, extension: &OsStr, limit: u32) -> Self {
        Self {
            directory: directory.to_path_buf(),
            base_name: base_name.to_os_string(),
            extension: extension.to_os_string(),
            next: 0,
            limit,
        }
    }

    /// Number of candidates produced so far.
    pub fn attempts(&self) -> u32 {
        self.next
    }

    fn exhausted(&self) -> GzpipeError {
        GzpipeError::NamesExhausted {
            directory: self.directory.clone(),
            base_name: self.base_name.clone(),
            extension: self.extension.clone(),
            attempts: self.next,
        }
    }
}

impl Iterator for Candidates {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.next >= self.limit {
            return None;
        }
        let path = self
            .directory
            .join(candidate_name(&self.base_name, &self.extension, self.next));
        self.next += 1;
        Some(path)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.limit.saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

/// Finds free output paths. Holds no state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniquePathResolver {
    max_attempts: u32,
}

impl UniquePathResolver {
    pub fn new(naming: &NamingConfig) -> Self {
        Self::with_max_attempts(naming.max_attempts)
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    pub fn candidates(&self, directory: &Path, base_name: &OsStr, extension: &OsStr) -> Result<Candidates> {
        if base_name.is_empty() {
            anyhow::bail!(GzpipeError::InvalidPath(
                "base name for an output file cannot be empty".to_string()
            ));
        }
        Ok(Candidates::new(directory, base_name, extension, self.max_attempts))
    }

    /// Returns the first candidate that does not exist at check time.
    ///
    /// # Errors
    ///
    /// - `GzpipeError::Access` if an existence check fails for a reason other than "not found".
    /// - `GzpipeError::NamesExhausted` if all `max_attempts` candidates exist.
    pub async fn resolve(&self, directory: &Path, base_name: &OsStr, extension: &OsStr) -> Result<PathBuf> {
        let mut candidates = self.candidates(directory, base_name, extension)?;
        while let Some(candidate) = candidates.next() {
            if !io::is_taken(&candidate).await? {
                debug!("Resolved free path {:?} after {} attempt(s)", candidate, candidates.attempts());
                return Ok(candidate);
            }
            debug!("{:?} already exists, trying next candidate", candidate);
        }
        let err = candidates.exhausted();
        error!("{}", err);
        Err(err.into())
    }

    /// Atomically creates the first free candidate and returns it with its open handle.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve); creation failures other than
    /// "already exists" are reported as `GzpipeError::Access`.
    pub async fn claim(&self, directory: &Path, base_name: &OsStr, extension: &OsStr) -> Result<(PathBuf, File)> {
        let mut candidates = self.candidates(directory, base_name, extension)?;
        while let Some(candidate) = candidates.next() {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => {
                    debug!("Claimed {:?} after {} attempt(s)", candidate, candidates.attempts());
                    return Ok((candidate, file));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{:?} already exists, trying next candidate", candidate);
                }
                Err(e) => {
                    return Err(GzpipeError::Access {
                        path: candidate,
                        source: e,
                    }
                    .into());
                }
            }
        }
        let err = candidates.exhausted();
        error!("{}", err);
        Err(err.into())
    }
}
