//! Chunk Reader
//!
//! Sequential, fixed-buffer reads over the whole file.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

use crate::config::WORD_SIZE;
use crate::error::Result;

use super::open_if_exists;

/// Reads a file front to back in chunks of a fixed size
///
/// The buffer is allocated once and reused, so memory stays at `chunk_size`
/// however large the file is. Every chunk except the last is exactly
/// `chunk_size` bytes, which keeps chunk boundaries word aligned.
///
/// A missing file behaves like an empty one.
pub struct ChunkReader {
    /// Open handle, dropped once end of file is reached
    file: Option<File>,
    /// Reused read buffer
    buffer: Vec<u8>,
    /// Valid bytes in `buffer`
    len: usize,
    /// File offset of `buffer[0]`
    offset: u64,
    /// File offset of the next chunk
    next_offset: u64,
}

impl ChunkReader {
    pub(crate) fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        let chunk_size = chunk_size.max(1).next_multiple_of(WORD_SIZE);
        let file = open_if_exists(path, OpenOptions::new().read(true))?;

        Ok(Self {
            file,
            buffer: vec![0u8; chunk_size],
            len: 0,
            offset: 0,
            next_offset: 0,
        })
    }

    /// Load the next chunk into the buffer
    ///
    /// Returns `Ok(false)` at end of file; the current chunk is then empty.
    pub fn advance(&mut self) -> Result<bool> {
        let Some(file) = self.file.as_mut() else {
            self.len = 0;
            return Ok(false);
        };

        let mut filled = 0;
        while filled < self.buffer.len() {
            match file.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        self.offset = self.next_offset;
        self.next_offset += filled as u64;
        self.len = filled;

        if filled < self.buffer.len() {
            // Short read means EOF; release the handle now
            self.file = None;
        }

        Ok(filled > 0)
    }

    /// Advance and return the new chunk, or `None` at end of file
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        if self.advance()? {
            Ok(Some(self.chunk()))
        } else {
            Ok(None)
        }
    }

    /// The chunk loaded by the last `advance`
    pub fn chunk(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// File offset of the first byte of the current chunk
    pub fn chunk_offset(&self) -> u64 {
        self.offset
    }

    /// Buffer capacity in bytes
    pub fn chunk_size(&self) -> usize {
        self.buffer.len()
    }
}
