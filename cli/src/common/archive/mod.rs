//! # gzpipe Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Everything that moves bytes through a gzip transform lives here:
//!
//! - **`pipeline`**: The generic `source -> transform -> sink` copy loop with
//!   stage-attributed errors and guaranteed release of both ends.
//! - **`compression`**: `compress_file` / `decompress_file`, which combine the
//!   pipeline with unique output naming from `common::fs::unique`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::compression;
//!
//! let packed = compression::compress_file(Path::new("report.csv"), &cfg).await?;
//! println!("{}", packed.display()); // report.csv.gz
//! ```
//!

pub mod compression;
pub mod pipeline;
