//! # gzpipe Resolve Command Handler
//!
//! File: cli/src/commands/resolve.rs
//!
//! ## Overview
//!
//! Implements `gzpipe resolve <DIRECTORY> <BASE_NAME> [EXTENSION]`, which prints
//! the first free name from `BASE_NAME.EXT`, `BASE_NAME_1.EXT`, ... without
//! creating anything. Handy for scripts that want the same collision rules as
//! `compress` and `decompress`.
//!
//! ## Usage
//!
//! ```bash
//! gzpipe resolve ./logs app .log        # ./logs/app.log, or ./logs/app_1.log, ...
//! gzpipe resolve . Makefile             # no extension
//! gzpipe resolve --max-attempts 5 . x .gz
//! ```
//!
use crate::{
    common::fs::unique::UniquePathResolver,
    core::{config::Config, error::Result},
};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;

/// # Resolve Arguments (`ResolveArgs`)
#[derive(Parser, Debug)]
#[command(about = "Print the first free numbered file name in a directory")]
pub struct ResolveArgs {
    /// Directory to look in.
    directory: PathBuf,

    /// File name without extension.
    base_name: OsString,

    /// Extension including its leading dot (e.g. `.txt`). May be omitted.
    extension: Option<OsString>,

    /// Maximum number of candidates to try. Defaults to the configured value.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: Option<u32>,
}

/// # Handle Resolve Command (`handle_resolve`)
pub async fn handle_resolve(args: ResolveArgs, cfg: Config) -> Result<()> {
    info!(
        "Handling resolve command (Directory: {:?}, Base: {:?}, Extension: {:?})",
        args.directory, args.base_name, args.extension
    );
    let resolver = match args.max_attempts {
        Some(max) => UniquePathResolver::with_max_attempts(max),
        None => UniquePathResolver::new(&cfg.naming),
    };

    let extension = args.extension.unwrap_or_default();
    let path = resolver
        .resolve(&args.directory, &args.base_name, &extension)
        .await?;
    println!("{}", path.display());
    Ok(())
}
