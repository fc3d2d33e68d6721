//! Byte Store
//!
//! Stateless single-byte reads and writes against a file path.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, SyncStrategy};
use crate::error::Result;
use crate::format::byte_to_string;

use super::{open_if_exists, ChunkReader};

/// Positional byte access to a single file
///
/// Offset `p` is the file's `p`-th byte. Reads past the end (or against a
/// missing file) return `None`. Writes past the end extend the file and
/// the gap reads back as zeros.
///
/// ## Concurrency
/// None. `update_byte` reads and writes through separate syscalls, so two
/// writers on the same path can lose updates. Callers that need more than
/// one writer must serialize them (see [`crate::SharedBitIds`]).
#[derive(Debug, Clone)]
pub struct ByteStore {
    /// Backing file
    path: PathBuf,
    /// Whether writes are followed by `sync_data`
    sync_strategy: SyncStrategy,
}

impl ByteStore {
    /// Create a store over `path` with the default config
    ///
    /// Does not touch the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, &Config::default())
    }

    /// Create a store over `path`
    pub fn with_config(path: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            path: path.into(),
            sync_strategy: config.sync_strategy,
        }
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Current file length in bytes (0 if the file does not exist)
    pub fn len(&self) -> Result<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the file is empty or missing
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read the byte at `position`
    ///
    /// Returns `Ok(None)` if the position is at or past the end of the file,
    /// or if the file does not exist.
    pub fn read_byte(&self, position: u64) -> Result<Option<u8>> {
        let Some(mut file) = open_if_exists(&self.path, OpenOptions::new().read(true))? else {
            return Ok(None);
        };
        read_at(&mut file, position)
    }

    /// Read the final byte of the file
    ///
    /// Returns `Ok(None)` for an empty or missing file.
    pub fn read_last_byte(&self) -> Result<Option<u8>> {
        let Some(mut file) = open_if_exists(&self.path, OpenOptions::new().read(true))? else {
            return Ok(None);
        };
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(None);
        }
        read_at(&mut file, len - 1)
    }

    /// Write `value` at `position`
    ///
    /// Creates the file if needed. Writing past the end zero-fills the gap.
    pub fn write_byte(&self, position: u64, value: u8) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        self.write_at(&mut file, position, value)
    }

    /// Read-modify-write the byte at `position`
    ///
    /// A missing byte (past the end, or no file) is passed to `mutate` as 0.
    /// The result is written back only if it differs from the old value.
    ///
    /// Returns whether a write happened.
    pub fn update_byte<F>(&self, position: u64, mutate: F) -> Result<bool>
    where
        F: FnOnce(u8) -> u8,
    {
        let mut file = open_if_exists(&self.path, OpenOptions::new().read(true).write(true))?;

        let old = match file.as_mut() {
            Some(f) => read_at(f, position)?.unwrap_or(0),
            None => 0,
        };

        let new = mutate(old);
        if new == old {
            return Ok(false);
        }

        tracing::trace!(
            position,
            old = %byte_to_string(old),
            new = %byte_to_string(new),
            "Mutating byte"
        );

        match file {
            Some(mut f) => self.write_at(&mut f, position, new)?,
            None => self.write_byte(position, new)?,
        }
        Ok(true)
    }

    /// Open a sequential reader that yields the file in `chunk_size` pieces
    ///
    /// `chunk_size` is rounded up to a whole number of 8-byte words.
    pub fn chunks(&self, chunk_size: usize) -> Result<ChunkReader> {
        ChunkReader::open(&self.path, chunk_size)
    }

    fn write_at(&self, file: &mut File, position: u64, value: u8) -> Result<()> {
        file.seek(SeekFrom::Start(position))?;
        file.write_all(&[value])?;

        if self.sync_strategy == SyncStrategy::EveryWrite {
            file.sync_data()?;
        }

        tracing::debug!(position, path = %self.path.display(), "Wrote byte");
        Ok(())
    }
}

fn read_at<F: Read + Seek>(file: &mut F, position: u64) -> Result<Option<u8>> {
    let len = file.seek(SeekFrom::End(0))?;
    if position >= len {
        return Ok(None);
    }

    file.seek(SeekFrom::Start(position))?;
    let mut byte = [0u8; 1];
    file.read_exact(&mut byte)?;

    tracing::trace!(position, value = byte[0], "Read byte");
    Ok(Some(byte[0]))
}
