//! # gzpipe Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small async helpers around `tokio::fs` that the naming and pipeline code
//! build on:
//! - **`split_path`**: Decomposes a path into directory, base name, and extension
//!   (`dir/archive.tar.gz` -> `dir`, `archive.tar`, `.gz`).
//! - **`is_taken`**: Existence probe that separates "does not exist" (an answer)
//!   from every other failure (an `Access` error).
//! - **`ensure_accessible`**: Fails fast with an `Access` error if a source path cannot be stat'ed.
//! - **`remove_partial_output`**: Best-effort removal of an output file left behind by a failed pipeline.
//!
//! ```rust
//! let parts = io::split_path(Path::new("logs/app.log"))?;
//! assert_eq!(parts.base_name, "app");
//! if io::is_taken(&parts.directory.join("app.log.gz")).await? {
//!     // pick another name
//! }
//! ```
//!
use crate::core::error::{GzpipeError, Result};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A path split into the pieces used to build candidate names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Parent directory. Empty for a bare file name (current directory).
    pub directory: PathBuf,
    /// File name without its last extension.
    pub base_name: OsString,
    /// Last extension including the leading `.`, or empty.
    pub extension: OsString,
}

/// Splits `path` at its last extension.
///
/// A name whose only dot is the leading one (`.bashrc`) has no extension.
///
/// # Errors
///
/// Returns `GzpipeError::InvalidPath` if the path has no file name component
/// (`/`, `..`, or an empty path).
pub fn split_path(path: &Path) -> Result<PathParts> {
    let base_name = path
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            GzpipeError::InvalidPath(format!("'{}' does not name a file", path.display()))
        })?
        .to_os_string();

    let mut extension = OsString::new();
    if let Some(ext) = path.extension() {
        extension.push(".");
        extension.push(ext);
    }

    let directory = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    Ok(PathParts {
        directory,
        base_name,
        extension,
    })
}

/// Reports whether something already occupies `path`.
///
/// Symlinks are not followed, so a dangling link still counts as taken and is
/// never written through.
///
/// # Errors
///
/// Any failure other than `NotFound` (e.g. permission denied on the parent
/// directory) is returned as `GzpipeError::Access`.
pub async fn is_taken(path: &Path) -> Result<bool> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GzpipeError::Access {
            path: path.to_path_buf(),
            source: e,
        }
        .into()),
    }
}

/// Verifies that `path` exists and can be stat'ed, following symlinks.
pub async fn ensure_accessible(path: &Path) -> Result<()> {
    tokio::fs::metadata(path)
        .await
        .map(|_| ())
        .map_err(|e| {
            GzpipeError::Access {
                path: path.to_path_buf(),
                source: e,
            }
            .into()
        })
}

/// Removes a partially written output file. Never fails; problems are logged.
pub async fn remove_partial_output(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial output {:?}", path),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial output {:?}: {}", path, e),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parts(path: &str) -> PathParts {
        split_path(Path::new(path)).unwrap()
    }

    #[test]
    fn test_split_simple() {
        let p = parts("files/source.txt");
        assert_eq!(p.directory, PathBuf::from("files"));
        assert_eq!(p.base_name, "source");
        assert_eq!(p.extension, ".txt");
    }

    #[test]
    fn test_split_keeps_inner_dots_in_base_name() {
        let p = parts("/var/backups/archive.tar.gz");
        assert_eq!(p.directory, PathBuf::from("/var/backups"));
        assert_eq!(p.base_name, "archive.tar");
        assert_eq!(p.extension, ".gz");
    }

    #[test]
    fn test_split_no_extension_and_dotfile() {
        let p = parts("README");
        assert_eq!(p.directory, PathBuf::new());
        assert_eq!(p.base_name, "README");
        assert_eq!(p.extension, "");

        let p = parts("home/.bashrc");
        assert_eq!(p.base_name, ".bashrc");
        assert_eq!(p.extension, "");
    }

    #[test]
    fn test_split_trailing_dot() {
        let p = parts("notes.");
        assert_eq!(p.base_name, "notes");
        assert_eq!(p.extension, ".");
    }

    #[test]
    fn test_split_rejects_non_file_paths() {
        for bad in ["/", "..", ""] {
            let err = split_path(Path::new(bad)).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<GzpipeError>(),
                Some(GzpipeError::InvalidPath(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_is_taken() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("present.txt");
        fs::write(&file, "x")?;

        assert!(is_taken(&file).await?);
        assert!(is_taken(dir.path()).await?);
        assert!(!is_taken(&dir.path().join("absent.txt")).await?);
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_is_taken() -> Result<()> {
        let dir = tempdir()?;
        let link = dir.path().join("link.txt");
        std::os::unix::fs::symlink(dir.path().join("missing-target"), &link)?;

        assert!(is_taken(&link).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_accessible_missing() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope.gz");

        let err = ensure_accessible(&missing).await.unwrap_err();
        match err.downcast_ref::<GzpipeError>() {
            Some(GzpipeError::Access { path, source }) => {
                assert_eq!(path, &missing);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected Access error, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_partial_output() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("half.gz");
        fs::write(&file, "partial")?;

        remove_partial_output(&file).await;
        assert!(!file.exists());
        // Second call on a missing file is a quiet no-op.
        remove_partial_output(&file).await;
        Ok(())
    }
}
