//! # gzpipe Decompress Command Handler
//!
//! File: cli/src/commands/decompress.rs
//!
//! ## Overview
//!
//! Implements `gzpipe decompress <SOURCE> <DESTINATION>`: decode a gzip file to
//! the given destination and print the path actually written. If the
//! destination exists, a numbered sibling is used (`report_1.csv`). The
//! source must exist; this is checked before anything is written.
//!
//! ## Usage
//!
//! ```bash
//! gzpipe decompress files/source.txt.gz files/source_decompressed.txt
//! gzpipe decompress --atomic backup.sql.gz restore/backup.sql
//! ```
//!
use crate::{
    common::archive::compression,
    core::{
        config::Config,
        error::{GzpipeError, Result, Stage},
    },
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// # Decompress Arguments (`DecompressArgs`)
#[derive(Parser, Debug)]
#[command(about = "Decompress a gzip file to a destination without overwriting existing files")]
pub struct DecompressArgs {
    /// Gzip file to decompress.
    source: PathBuf,

    /// Desired output path. Numbered (`name_1.ext`, ...) if it already exists.
    destination: PathBuf,

    /// Claim the output name with create-new semantics (safe against concurrent writers).
    #[arg(long)]
    atomic: bool,
}

/// # Handle Decompress Command (`handle_decompress`)
///
/// Decompresses `args.source` to `args.destination` and prints the final path on stdout.
pub async fn handle_decompress(args: DecompressArgs, mut cfg: Config) -> Result<()> {
    info!(
        "Handling decompress command (Source: {:?}, Destination: {:?})",
        args.source, args.destination
    );
    if args.atomic {
        cfg.naming.atomic_create = true;
    }

    match compression::decompress_file(&args.source, &args.destination, &cfg).await {
        Ok(output) => {
            println!("{}", output.display());
            Ok(())
        }
        Err(e) => {
            if e.downcast_ref::<GzpipeError>().and_then(GzpipeError::stage) == Some(Stage::Transform) {
                warn!("{:?} does not look like valid gzip data", args.source);
            }
            Err(e)
        }
    }
}
