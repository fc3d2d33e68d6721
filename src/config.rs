//! Configuration for BitIds
//!
//! Centralized configuration with sensible defaults.

use crate::error::{BitIdsError, Result};

/// Default scan chunk: 64 KiB
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Size of one scan word in bytes
pub const WORD_SIZE: usize = 8;

/// Main configuration for a bitmap file
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Scan Configuration
    // -------------------------------------------------------------------------
    /// Bytes read per chunk when counting, searching or enumerating.
    /// Upper bound on the memory any scan holds, regardless of file size.
    /// Always a non-zero multiple of [`WORD_SIZE`].
    pub chunk_size: usize,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: whether byte writes are fsynced
    pub sync_strategy: SyncStrategy,
}

/// Byte write sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Leave flushing to the operating system
    OsManaged,

    /// `sync_data` after every byte written (safest, slowest)
    EveryWrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            sync_strategy: SyncStrategy::OsManaged,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the scan chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Validate and return the config
    ///
    /// Fails if the chunk size is zero or not word aligned.
    pub fn build(self) -> Result<Config> {
        let size = self.config.chunk_size;
        if size == 0 || size % WORD_SIZE != 0 {
            return Err(BitIdsError::Config(format!(
                "chunk_size must be a non-zero multiple of {}, got {}",
                WORD_SIZE, size
            )));
        }
        Ok(self.config)
    }
}
