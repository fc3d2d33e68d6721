//! Bitmap Module
//!
//! ID semantics over the byte store.
//!
//! ## Responsibilities
//! - Map IDs to (byte, bit) positions
//! - Membership tests, set/clear, lowest-free allocation
//! - Population count and ordered enumeration with bounded memory
//!
//! ## Bit Layout
//! ```text
//!   byte 0                          byte 1
//! ┌────┬────┬────┬────┬────┬────┬────┬────┐┌────┬────┬─────
//! │ 0  │ 1  │ 2  │ 3  │ 4  │ 5  │ 6  │ 7  ││ 8  │ 9  │ ...
//! └────┴────┴────┴────┴────┴────┴────┴────┘└────┴────┴─────
//!  0x80                               0x01  0x80
//! ```
//! No header. IDs past the last byte are implicitly unset.

pub mod bits;
mod ids;
mod index;
mod scan;

pub use ids::IdIter;
pub use index::BitIds;
