//! # gzpipe Compression Pipelines (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//!
//! ## Overview
//!
//! Gzip compression and decompression of single files without clobbering
//! existing outputs:
//!
//! - **`compress_file`**: `notes.txt` -> `notes.txt.gz` (or `notes_1.txt.gz`, ...
//!   if that name is taken). Returns the path that was written.
//! - **`decompress_file`**: Decodes a gzip file to the requested destination,
//!   again numbering the name if the destination already exists. The source
//!   is checked before anything is written.
//!
//! ## Architecture
//!
//! Each call goes Idle -> Resolving-Path -> Streaming -> Done, with any failure
//! ending the call:
//!
//! 1. Split the path that determines the output name (`common::fs::io::split_path`).
//! 2. Pick the output name with `UniquePathResolver`. In the default mode this is a
//!    plain existence check; with `naming.atomic_create` the name is claimed with
//!    create-new semantics when the sink is opened. Either way the sink is opened
//!    create-new, so a file that appeared after the check is never truncated.
//! 3. Open the source as a buffered reader, wrap it in the `async-compression`
//!    gzip encoder/decoder, open the sink, and hand both to `pipeline::run`.
//! 4. On a streaming failure, remove the partial output if `compression.remove_partial`
//!    is set, log the error, and return it.
//!
//! The gzip codec itself comes from `async-compression`; nothing here knows the format.
//!
//! ## Usage
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let packed = compression::compress_file(Path::new("files/source.txt"), &cfg).await?;
//! let unpacked = compression::decompress_file(&packed, Path::new("files/source_decompressed.txt"), &cfg).await?;
//! ```
//!
use crate::common::archive::pipeline::{self, Endpoints};
use crate::common::fs::io::{self, PathParts};
use crate::common::fs::unique::UniquePathResolver;
use crate::core::config::{CompressionConfig, Config};
use crate::core::error::{GzpipeError, Result, Stage};
use async_compression::tokio::bufread::{GzipDecoder, GzipEncoder};
use async_compression::Level;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, BufReader};
use tracing::{debug, error, info};

/// Maps the configured 0-9 level onto the codec's level type.
fn gzip_level(compression: &CompressionConfig) -> Level {
    match compression.level {
        Some(level) => Level::Precise(level as i32),
        None => Level::Default,
    }
}

/// Output name chosen in the resolving step.
enum Destination {
    /// Checked to be free; created when the sink is opened. If another writer
    /// took the name in between, opening fails instead of replacing its file.
    Resolved(PathBuf),
    /// Claimed atomically when the sink is opened.
    Deferred(PathParts),
}

impl Destination {
    async fn plan(resolver: &UniquePathResolver, parts: PathParts, atomic: bool) -> Result<Self> {
        if atomic {
            return Ok(Destination::Deferred(parts));
        }
        let path = resolver
            .resolve(&parts.directory, &parts.base_name, &parts.extension)
            .await?;
        Ok(Destination::Resolved(path))
    }

    async fn open(self, resolver: &UniquePathResolver) -> Result<(PathBuf, File)> {
        match self {
            Destination::Resolved(path) => match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => Ok((path, file)),
                Err(e) => Err(GzpipeError::Pipeline {
                    stage: Stage::Write,
                    path,
                    source: e,
                }
                .into()),
            },
            Destination::Deferred(parts) => {
                resolver
                    .claim(&parts.directory, &parts.base_name, &parts.extension)
                    .await
            }
        }
    }
}

async fn open_source(path: &Path, buffer_size: usize) -> Result<BufReader<File>> {
    match File::open(path).await {
        Ok(file) => Ok(BufReader::with_capacity(buffer_size, file)),
        Err(e) => Err(GzpipeError::Pipeline {
            stage: Stage::Read,
            path: path.to_path_buf(),
            source: e,
        }
        .into()),
    }
}

/// Streams `transform` into `sink`, cleaning up `sink_path` on failure if configured.
async fn stream<T>(
    transform: T,
    sink: File,
    source_path: &Path,
    sink_path: &Path,
    compression: &CompressionConfig,
) -> Result<u64>
where
    T: AsyncRead + Unpin,
{
    let endpoints = Endpoints {
        source: source_path,
        sink: sink_path,
    };
    match pipeline::run(transform, sink, compression.buffer_size, endpoints).await {
        Ok(written) => Ok(written),
        Err(e) => {
            if compression.remove_partial {
                io::remove_partial_output(sink_path).await;
            }
            Err(e.into())
        }
    }
}

/// Compresses `source` with gzip next to itself.
///
/// The output name is the source name plus the configured suffix, numbered
/// if taken. The returned path is only handed back after the output has been
/// fully written and closed.
///
/// # Errors
///
/// - `GzpipeError::InvalidPath` if `source` does not name a file.
/// - `GzpipeError::Access` / `NamesExhausted` from output-name resolution.
/// - `GzpipeError::Pipeline` if reading, encoding, or writing fails.
pub async fn compress_file(source: &Path, config: &Config) -> Result<PathBuf> {
    let result = run_compress(source, config).await;
    if let Err(e) = &result {
        error!("An error occurred during compression of {:?}: {:#}", source, e);
    }
    result
}

async fn run_compress(source: &Path, config: &Config) -> Result<PathBuf> {
    let compression = &config.compression;
    let resolver = UniquePathResolver::new(&config.naming);

    let mut parts = io::split_path(source)?;
    parts.extension.push(&compression.suffix);

    let destination = Destination::plan(&resolver, parts, config.naming.atomic_create).await?;

    let reader = open_source(source, compression.buffer_size).await?;
    let encoder = GzipEncoder::with_quality(reader, gzip_level(compression));
    let (output, sink) = destination.open(&resolver).await?;
    debug!("Compressing {:?} -> {:?}", source, output);

    let written = stream(encoder, sink, source, &output, compression).await?;
    info!(
        "Compression finished successfully: {:?} ({} bytes written)",
        output, written
    );
    Ok(output)
}

/// Decompresses the gzip file `source` to `destination`, numbering the name if taken.
///
/// `destination` is used as given; no suffix is stripped or checked. The
/// source is verified before any output is created, so a missing source
/// leaves the destination directory untouched. Multi-member gzip files are
/// decoded in full.
///
/// # Errors
///
/// - `GzpipeError::Access` if `source` does not exist or cannot be accessed.
/// - `GzpipeError::Access` / `NamesExhausted` from output-name resolution.
/// - `GzpipeError::Pipeline` if reading, decoding, or writing fails.
pub async fn decompress_file(source: &Path, destination: &Path, config: &Config) -> Result<PathBuf> {
    let result = run_decompress(source, destination, config).await;
    if let Err(e) = &result {
        error!("An error occurred during decompression of {:?}: {:#}", source, e);
    }
    result
}

async fn run_decompress(source: &Path, destination: &Path, config: &Config) -> Result<PathBuf> {
    let compression = &config.compression;
    let resolver = UniquePathResolver::new(&config.naming);

    let parts = io::split_path(destination)?;
    let planned = Destination::plan(&resolver, parts, config.naming.atomic_create).await?;

    io::ensure_accessible(source).await?;

    let reader = open_source(source, compression.buffer_size).await?;
    let mut decoder = GzipDecoder::new(reader);
    decoder.multiple_members(true);
    let (output, sink) = planned.open(&resolver).await?;
    debug!("Decompressing {:?} -> {:?}", source, output);

    let written = stream(decoder, sink, source, &output, compression).await?;
    info!(
        "Decompression finished successfully: {:?} ({} bytes written)",
        output, written
    );
    Ok(output)
}
