//! Bitmap Index
//!
//! ID-level operations on top of a [`ByteStore`].

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::store::ByteStore;

use super::bits::{self, BITS_PER_BYTE};
use super::ids::IdIter;
use super::scan;

/// Persistent set of non-negative integer IDs, one bit per ID
///
/// ID `i` lives in byte `i / 8`, bit `i % 8` counted from the most
/// significant end. IDs at or beyond `8 * file_len` are unset without
/// being stored, so the file only grows as far as the highest ID written.
///
/// Negative IDs are never members and are rejected by `update` with
/// `false`, without touching the file.
///
/// ## Concurrency
/// Every call opens and closes its own handle and nothing is locked.
/// Concurrent `update`/`get_id` calls on the same file race; use
/// [`crate::SharedBitIds`] or an external lock for more than one writer.
#[derive(Debug, Clone)]
pub struct BitIds {
    /// Byte-level access to the backing file
    store: ByteStore,
    config: Config,
}

impl BitIds {
    /// Create a bitmap over `path` with the default config
    ///
    /// The file is not created until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, Config::default())
    }

    /// Create a bitmap over `path` with the given config
    pub fn with_config(path: impl Into<PathBuf>, config: Config) -> Self {
        let store = ByteStore::with_config(path, &config);
        Self { store, config }
    }

    /// Check whether `id` is set
    ///
    /// `false` for negative IDs, a missing file, or IDs past the end of
    /// the file.
    pub fn contains(&self, id: i64) -> Result<bool> {
        let Ok(id) = u64::try_from(id) else {
            return Ok(false);
        };

        let byte = self.store.read_byte(bits::byte_position(id))?;
        Ok(byte.is_some_and(|b| bits::is_set(b, id)))
    }

    /// Set (`state = true`) or clear (`state = false`) the bit for `id`
    ///
    /// Returns whether the file changed:
    /// - `false` for a negative `id` (nothing is touched)
    /// - `true` if the file had to be created, even when clearing
    /// - otherwise whether the stored byte actually changed
    pub fn update(&self, id: i64, state: bool) -> Result<bool> {
        let Ok(id) = u64::try_from(id) else {
            return Ok(false);
        };
        let position = bits::byte_position(id);

        if !self.store.exists() {
            self.store.write_byte(position, bits::apply(0, id, state))?;
            tracing::debug!(id, state, path = %self.path().display(), "Created bitmap file");
            return Ok(true);
        }

        self.store
            .update_byte(position, |byte| bits::apply(byte, id, state))
    }

    /// Allocate the lowest unset ID
    ///
    /// Finds the first clear bit, sets it and returns its ID. Not safe
    /// against concurrent writers.
    pub fn get_id(&self) -> Result<i64> {
        let id = self.find_first_zero_id()?;
        self.update(id, true)?;
        tracing::debug!(id, "Allocated id");
        Ok(id)
    }

    /// Count the set IDs in the whole file (0 if missing)
    pub fn read_count(&self) -> Result<u64> {
        let mut reader = self.store.chunks(self.config.chunk_size)?;
        let mut count = 0u64;

        while let Some(chunk) = reader.next_chunk()? {
            count += scan::count_ones(chunk);
        }

        Ok(count)
    }

    /// Position of the first clear bit
    ///
    /// If every stored bit is set (or the file is empty/missing) this is
    /// `8 * file_len`, the next ID to append.
    pub fn find_first_zero_bit(&self) -> Result<u64> {
        let mut reader = self.store.chunks(self.config.chunk_size)?;
        let mut scanned = 0u64;

        while let Some(chunk) = reader.next_chunk()? {
            if let Some(bit) = scan::first_zero_bit(chunk) {
                return Ok(scanned * BITS_PER_BYTE + bit);
            }
            scanned += chunk.len() as u64;
        }

        Ok(scanned * BITS_PER_BYTE)
    }

    /// The lowest unset ID
    pub fn find_first_zero_id(&self) -> Result<i64> {
        Ok(self.find_first_zero_bit()? as i64)
    }

    /// Iterate over set IDs in ascending order
    pub fn ids(&self) -> Result<IdIter> {
        let reader = self.store.chunks(self.config.chunk_size)?;
        Ok(IdIter::new(reader))
    }

    /// Call `action` for every set ID, in ascending order
    ///
    /// Stops at the first I/O error.
    pub fn read_ids<F>(&self, mut action: F) -> Result<()>
    where
        F: FnMut(i64),
    {
        for id in self.ids()? {
            action(id?);
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the underlying byte store
    pub fn store(&self) -> &ByteStore {
        &self.store
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}
