//! # gzpipe Stream Pipeline (`common::archive::pipeline`)
//!
//! File: cli/src/common/archive/pipeline.rs
//!
//! ## Overview
//!
//! Runs `source -> transform -> sink` to completion. The transform is any
//! `AsyncRead` that wraps (and therefore owns) the source reader, e.g. a gzip
//! encoder over a buffered file. The sink is any `AsyncWrite`.
//!
//! ## Architecture
//!
//! `run` takes both ends *by value*. Whatever happens inside, they are dropped
//! (and their file handles closed) when it returns. On success the sink is
//! flushed and shut down before the byte count is returned, so a returned `Ok`
//! means every byte reached the destination file.
//!
//! Failures are attributed to a stage:
//! - write/flush/shutdown errors on the sink -> `Stage::Write`
//! - `InvalidData` / `UnexpectedEof` from the transform -> `Stage::Transform`
//!   (corrupt or truncated gzip)
//! - any other read error -> `Stage::Read`
//!
use crate::core::error::{GzpipeError, Stage};
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// Endpoints of a pipeline, used to label errors.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    pub source: &'a Path,
    pub sink: &'a Path,
}

impl Endpoints<'_> {
    fn fail(&self, stage: Stage, source: io::Error) -> GzpipeError {
        let path: PathBuf = match stage {
            Stage::Read | Stage::Transform => self.source.to_path_buf(),
            Stage::Write => self.sink.to_path_buf(),
        };
        GzpipeError::Pipeline {
            stage,
            path,
            source,
        }
    }
}

fn read_stage(err: &io::Error) -> Stage {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => Stage::Transform,
        _ => Stage::Read,
    }
}

/// Pumps `transform` into `sink` using a `buffer_size` byte buffer.
///
/// Returns the number of bytes written to the sink.
pub async fn run<T, W>(
    mut transform: T,
    mut sink: W,
    buffer_size: usize,
    endpoints: Endpoints<'_>,
) -> Result<u64, GzpipeError>
where
    T: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut written: u64 = 0;

    loop {
        let n = match transform.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(endpoints.fail(read_stage(&e), e)),
        };
        sink.write_all(&buf[..n])
            .await
            .map_err(|e| endpoints.fail(Stage::Write, e))?;
        written += n as u64;
        trace!("Pumped {} bytes ({} total)", n, written);
    }

    sink.flush()
        .await
        .map_err(|e| endpoints.fail(Stage::Write, e))?;
    sink.shutdown()
        .await
        .map_err(|e| endpoints.fail(Stage::Write, e))?;
    Ok(written)
}
