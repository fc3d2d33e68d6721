//! Error types for BitIds
//!
//! Provides a unified error type for all operations.
//!
//! Reads past the end of the file and negative IDs are not errors: they are
//! reported through `None` and `false` respectively. Only storage failures
//! and invalid configuration end up here.

use thiserror::Error;

/// Result type alias using BitIdsError
pub type Result<T> = std::result::Result<T, BitIdsError>;

/// Unified error type for BitIds operations
#[derive(Debug, Error)]
pub enum BitIdsError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
