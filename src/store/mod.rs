//! Byte Store Module
//!
//! Positional single-byte access to a flat file.
//!
//! ## Responsibilities
//! - Read one byte at an absolute offset (`None` past the end)
//! - Write one byte at an absolute offset, creating/extending the file
//! - Read-modify-write of a single byte through a caller-supplied mutation
//! - Sequential chunked reads with a fixed-size buffer for scans
//!
//! ## Handle Lifecycle
//! No handle is cached. Every call opens the file, operates and drops the
//! handle before returning, so the file on disk is the only state:
//! ```text
//! ┌────────┐   open    ┌──────────┐  seek + read/write  ┌───────┐
//! │  call  │ ────────▶ │   File   │ ──────────────────▶ │ close │
//! └────────┘           └──────────┘                     └───────┘
//! ```

mod byte_store;
mod chunks;

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

pub use byte_store::ByteStore;
pub use chunks::ChunkReader;

/// Open `path` with `options`, mapping a missing file to `None`
pub(crate) fn open_if_exists(path: &Path, options: &OpenOptions) -> io::Result<Option<File>> {
    match options.open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
