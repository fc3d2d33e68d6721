//! Shared Bitmap
//!
//! Single-writer wrapper for using one bitmap file from several threads.

use std::path::Path;

use parking_lot::Mutex;

use crate::bitmap::{BitIds, IdIter};
use crate::error::Result;

/// A [`BitIds`] whose mutating calls are serialized
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// - **Writes** (`update`, `get_id`): serialized by `write_lock`, so the
///   read-then-write inside each call cannot interleave with another
///   writer in this process. Two `get_id` calls never return the same ID.
/// - **Reads** (`contains`, `read_count`, `find_first_zero_id`, `ids`):
///   no lock. They may observe a write in progress at byte granularity.
///
/// The lock is process-local. Other processes opening the same path are
/// not excluded.
pub struct SharedBitIds {
    bitmap: BitIds,

    /// Serializes write operations
    write_lock: Mutex<()>,
}

impl SharedBitIds {
    pub fn new(bitmap: BitIds) -> Self {
        Self {
            bitmap,
            write_lock: Mutex::new(()),
        }
    }

    /// Set or clear `id` (see [`BitIds::update`])
    pub fn update(&self, id: i64, state: bool) -> Result<bool> {
        let _write_guard = self.write_lock.lock();
        self.bitmap.update(id, state)
    }

    /// Allocate the lowest unset ID (see [`BitIds::get_id`])
    pub fn get_id(&self) -> Result<i64> {
        let _write_guard = self.write_lock.lock();
        self.bitmap.get_id()
    }

    pub fn contains(&self, id: i64) -> Result<bool> {
        self.bitmap.contains(id)
    }

    pub fn read_count(&self) -> Result<u64> {
        self.bitmap.read_count()
    }

    pub fn find_first_zero_id(&self) -> Result<i64> {
        self.bitmap.find_first_zero_id()
    }

    pub fn ids(&self) -> Result<IdIter> {
        self.bitmap.ids()
    }

    pub fn read_ids<F>(&self, action: F) -> Result<()>
    where
        F: FnMut(i64),
    {
        self.bitmap.read_ids(action)
    }

    /// Get the wrapped bitmap (unsynchronized)
    pub fn inner(&self) -> &BitIds {
        &self.bitmap
    }

    pub fn into_inner(self) -> BitIds {
        self.bitmap
    }

    pub fn path(&self) -> &Path {
        self.bitmap.path()
    }
}

impl From<BitIds> for SharedBitIds {
    fn from(bitmap: BitIds) -> Self {
        Self::new(bitmap)
    }
}
