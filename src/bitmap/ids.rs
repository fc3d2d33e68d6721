//! Set-ID Iterator
//!
//! Streams every set ID in ascending order, one chunk in memory at a time.

use bytes::Buf;

use crate::config::WORD_SIZE;
use crate::error::Result;
use crate::store::ChunkReader;

use super::bits::BITS_PER_BYTE;
use super::scan;

/// Iterator over set IDs, strictly increasing
///
/// Each nonzero 64-bit word is drained from its most significant bit down.
/// Bytes left over at the end of the file are handled as a word whose top
/// byte is the remaining byte and whose other bits are zero.
///
/// An I/O error is yielded once, after which the iterator is exhausted.
pub struct IdIter {
    reader: ChunkReader,
    /// Next unread byte in the current chunk
    cursor: usize,
    /// Bits of the current word not yet emitted
    word: u64,
    /// ID of the most significant bit of `word`
    word_base: u64,
    finished: bool,
}

impl IdIter {
    pub(crate) fn new(reader: ChunkReader) -> Self {
        Self {
            reader,
            cursor: 0,
            word: 0,
            word_base: 0,
            finished: false,
        }
    }

    /// Load the next word from the current chunk, refilling as needed
    ///
    /// Returns `Ok(false)` at end of file.
    fn load_word(&mut self) -> Result<bool> {
        loop {
            let remaining = self.reader.chunk().len() - self.cursor;
            let base = (self.reader.chunk_offset() + self.cursor as u64) * BITS_PER_BYTE;

            if remaining >= WORD_SIZE {
                let mut bytes = &self.reader.chunk()[self.cursor..];
                self.word = bytes.get_u64();
                self.word_base = base;
                self.cursor += WORD_SIZE;
                return Ok(true);
            }

            if remaining > 0 {
                self.word = u64::from(self.reader.chunk()[self.cursor]) << 56;
                self.word_base = base;
                self.cursor += 1;
                return Ok(true);
            }

            if !self.reader.advance()? {
                return Ok(false);
            }
            self.cursor = 0;
        }
    }
}

impl Iterator for IdIter {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bit) = scan::take_leading_bit(&mut self.word) {
                return Some(Ok((self.word_base + u64::from(bit)) as i64));
            }

            if self.finished {
                return None;
            }

            match self.load_word() {
                Ok(true) => continue,
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for IdIter {}
