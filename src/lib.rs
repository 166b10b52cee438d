//! Bounded-memory streaming zstd decompression between byte-stream endpoints.
//!
//! This crate bridges a zstd-compressed source to an uncompressed
//! destination in a single pass, staging data through two fixed-size
//! buffers sized from the codec's recommended minimums. Memory use is
//! independent of the stream length, which is what makes it suitable for
//! unpacking container image layers that are far larger than RAM.
//!
//! The common entry point takes anything readable and writable:
//!
//! ```no_run
//! let mut src = std::fs::File::open("layer.zst")?;
//! let mut dst = std::fs::File::create("layer")?;
//! zdstream::decompress(&mut src, &mut dst)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! On unix, [`fd::decompress_fd`] runs the same transform over borrowed
//! file descriptors (pipes, sockets, files) without taking ownership of
//! them.
//!
//! All I/O is blocking and the transform is fully synchronous; callers
//! needing cancellation or timeouts must provide endpoints that implement
//! them. Nothing written to the destination is rolled back on failure;
//! cleaning up a partial result is the caller's job.

pub mod decompressor;
#[cfg(unix)]
pub mod fd;
pub mod transfer;
pub mod zstd;

pub use decompressor::{DecompressResult, Decompressor};
pub use transfer::{decompress, Session};
pub use zstd::ZstdDecoder;

use std::collections::TryReserveError;

/// Terminal failure of a decompression transform.
///
/// Setup variants ([`ContextCreation`](TransformError::ContextCreation),
/// [`Init`](TransformError::Init), [`Allocation`](TransformError::Allocation))
/// occur before any byte reaches the destination. The remaining variants can
/// occur mid-stream, in which case output already written stays on the
/// destination.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("couldn't allocate a decompression context")]
    ContextCreation,
    #[error("couldn't initialize the decompression stream: {0}")]
    Init(&'static str),
    #[error("couldn't allocate staging buffers: {0}")]
    Allocation(#[from] TryReserveError),
    #[error("couldn't decompress stream: {0}")]
    Codec(&'static str),
    #[error("compressed stream ended in the middle of a frame")]
    TruncatedInput,
    #[error("destination accepted {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },
    #[error("couldn't read from the source: {0}")]
    Read(#[source] std::io::Error),
    #[error("couldn't write to the destination: {0}")]
    Write(#[source] std::io::Error),
}

pub type TransformResult<T> = Result<T, TransformError>;
