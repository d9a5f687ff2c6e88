//! # gzpipe Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`):
//!
//! - **`archive`**: The gzip stream pipelines (`compress_file`, `decompress_file`).
//! - **`fs`**: Path decomposition, existence probes, and the `UniquePathResolver`.
//!

/// Gzip stream pipelines.
pub mod archive;
/// Filesystem helpers and collision-free output naming.
pub mod fs;
