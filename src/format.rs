//! Binary-string formatting
//!
//! Human-readable renderings of bitmap bytes, MSB first so the leftmost
//! digit is the lowest ID in the byte.

use std::fmt::Write;

/// Render one byte as eight binary digits, e.g. `10000000`
pub fn byte_to_string(byte: u8) -> String {
    format!("{:08b}", byte)
}

/// Render a byte slice as `[xxxxxxxx][xxxxxxxx]...`, or `[]` if empty
pub fn bytes_to_string(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "[]".to_string();
    }

    let mut out = String::with_capacity(bytes.len() * 10);
    for byte in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "[{:08b}]", byte);
    }
    out
}
