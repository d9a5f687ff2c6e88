//! # gzpipe Compress Command Handler
//!
//! File: cli/src/commands/compress.rs
//!
//! ## Overview
//!
//! Implements `gzpipe compress <SOURCE>`: gzip a file next to itself and print
//! the path of the new file. An existing `<SOURCE>.gz` is never overwritten;
//! the output is numbered instead (`notes_1.txt.gz`).
//!
//! ## Usage
//!
//! ```bash
//! gzpipe compress files/source.txt          # -> files/source.txt.gz
//! gzpipe compress --level 9 big.log         # best compression
//! gzpipe compress --atomic shared/out.csv   # claim the output name atomically
//! ```
//!
use crate::{
    common::archive::compression,
    core::{
        config::{self, Config},
        error::Result,
    },
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Compress Arguments (`CompressArgs`)
#[derive(Parser, Debug)]
#[command(about = "Compress a file with gzip without overwriting existing outputs")]
pub struct CompressArgs {
    /// File to compress.
    source: PathBuf,

    /// Compression level, 0 (store) to 9 (best). Defaults to the configured or library level.
    #[arg(long, short, env = "GZPIPE_LEVEL", value_parser = clap::value_parser!(u32).range(0..=9))]
    level: Option<u32>,

    /// Claim the output name with create-new semantics (safe against concurrent writers).
    #[arg(long)]
    atomic: bool,
}

/// Applies the command-line overrides on top of the loaded configuration.
fn apply_overrides(args: &CompressArgs, mut cfg: Config) -> Result<Config> {
    if args.level.is_some() {
        cfg.compression.level = args.level;
    }
    if args.atomic {
        cfg.naming.atomic_create = true;
    }
    config::validate_config(&cfg)?;
    Ok(cfg)
}

/// # Handle Compress Command (`handle_compress`)
///
/// Compresses `args.source` and prints the output path on stdout.
pub async fn handle_compress(args: CompressArgs, cfg: Config) -> Result<()> {
    info!("Handling compress command (Source: {:?})", args.source);
    let cfg = apply_overrides(&args, cfg)?;

    let output = compression::compress_file(&args.source, &cfg).await?;
    println!("{}", output.display());
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_config() {
        let args = CompressArgs::try_parse_from(["compress", "a.txt", "--level", "3", "--atomic"])
            .unwrap();
        let cfg = apply_overrides(&args, Config::default()).unwrap();
        assert_eq!(cfg.compression.level, Some(3));
        assert!(cfg.naming.atomic_create);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut base = Config::default();
        base.compression.level = Some(8);
        let args = CompressArgs::try_parse_from(["compress", "a.txt"]).unwrap();
        let cfg = apply_overrides(&args, base.clone()).unwrap();
        assert_eq!(cfg, base);
    }

    #[test]
    fn test_level_out_of_range_rejected() {
        assert!(CompressArgs::try_parse_from(["compress", "a.txt", "--level", "10"]).is_err());
    }
}
