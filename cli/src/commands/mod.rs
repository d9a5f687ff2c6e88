//! # gzpipe Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per subcommand. Each defines a `clap` arguments struct and an
//! async `handle_*` function that receives the parsed arguments plus the loaded
//! configuration, applies its flag overrides, and prints its result on stdout.
//!
//! - `compress`: gzip a file next to itself
//! - `decompress`: gunzip a file to a destination
//! - `resolve`: print the next free numbered file name
//!

/// `gzpipe compress <SOURCE>`.
pub mod compress;
/// `gzpipe decompress <SOURCE> <DESTINATION>`.
pub mod decompress;
/// `gzpipe resolve <DIRECTORY> <BASE_NAME> [EXTENSION]`.
pub mod resolve;
