//! # gzpipe Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the pipelines:
//!
//! - **`io`**: Path decomposition, existence probes, and cleanup of partial outputs.
//! - **`unique`**: `UniquePathResolver`, which finds (or atomically claims) an
//!   output name that does not collide with an existing file.
//!
//! ```rust
//! use crate::common::fs::{io, unique::UniquePathResolver};
//!
//! let parts = io::split_path(source)?;
//! let out = UniquePathResolver::new(&config.naming)
//!     .resolve(&parts.directory, &parts.base_name, &parts.extension)
//!     .await?;
//! ```
//!

/// Path decomposition and small async filesystem probes.
pub mod io;
/// Collision-free output naming (`name.ext`, `name_1.ext`, ...).
pub mod unique;
