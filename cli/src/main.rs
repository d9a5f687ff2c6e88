//! # gzpipe Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the gzpipe CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration once and handing it to the command handlers
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - Each subcommand (`compress`, `decompress`, `resolve`) is a variant of `Commands`
//! - Handlers live in `commands::*` and receive their args plus the loaded `Config`
//! - All errors are propagated to this level, printed once, and turned into exit status 1
//!
//! Logs go to stderr; stdout only carries the paths produced by the commands,
//! so `gzpipe compress a.txt | xargs ls -l` works.
//!
//! The runtime is Tokio's current-thread scheduler: every pipeline stage
//! suspends on I/O and resumes cooperatively on a single thread.
//!
//! ## Examples
//!
//! ```bash
//! gzpipe compress ./files/source.txt
//! gzpipe -v decompress ./files/source.txt.gz ./files/source_decompressed.txt
//! gzpipe --config ci.toml compress --level 9 dump.sql
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (compress, decompress, resolve)
mod common; // Shared utilities (pipelines, naming, fs helpers)
mod core; // Core infrastructure (errors, config)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "gzpipe",
    about = "Gzip files in and out without clobbering existing outputs",
    long_about = "Compress and decompress files with gzip. Output names that already exist\n\
                  are never overwritten; a numbered name (name_1.ext, name_2.ext, ...) is used instead.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this file instead of the user/project files.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Compress(commands::compress::CompressArgs),
    #[command(alias = "d")]
    Decompress(commands::decompress::DecompressArgs),
    Resolve(commands::resolve::ResolveArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match crate::core::config::load_config(cli.config.as_deref()) {
        Ok(cfg) => match cli.command {
            Commands::Compress(args) => commands::compress::handle_compress(args, cfg).await,
            Commands::Decompress(args) => {
                commands::decompress::handle_decompress(args, cfg).await
            }
            Commands::Resolve(args) => commands::resolve::handle_resolve(args, cfg).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
