//! # BitIds
//!
//! A persistent bitmap of integer IDs stored in a flat file:
//! - One bit per ID, most significant bit first, no header
//! - Membership, set/clear and lowest-free allocation straight on disk
//! - Population count and ordered enumeration in fixed-size chunks
//! - No cached handles: the file is the only state
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SharedBitIds (optional)                     │
//! │                (Single Writer / Multi Reader)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        BitIds                                │
//! │    contains / update / get_id / read_count / read_ids        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  ByteStore  │          │ ChunkReader │
//!   │ (read/write │          │  (bounded   │
//!   │  /update)   │          │   scans)    │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!                ┌─────────────┐
//!                │ bitmap file │
//!                └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bitids::BitIds;
//!
//! # fn main() -> bitids::Result<()> {
//! let ids = BitIds::new("ids.bin");
//! let id = ids.get_id()?;
//! assert!(ids.contains(id)?);
//! ids.update(id, false)?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod bitmap;
pub mod shared;
pub mod format;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BitIdsError, Result};
pub use config::{Config, SyncStrategy};
pub use store::ByteStore;
pub use bitmap::{BitIds, IdIter};
pub use shared::SharedBitIds;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of BitIds
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
