//! Bit-mask primitives
//!
//! Pure helpers mapping an ID onto its byte and bit. Bits are numbered most
//! significant first: bit 0 of a byte is mask `0x80`, bit 7 is mask `0x01`.

/// Number of IDs stored per byte
pub const BITS_PER_BYTE: u64 = 8;

/// Byte offset holding `id`
#[inline]
pub const fn byte_position(id: u64) -> u64 {
    id / BITS_PER_BYTE
}

/// Bit index of `id` within its byte (0 = most significant)
#[inline]
pub const fn bit_position(id: u64) -> u32 {
    (id % BITS_PER_BYTE) as u32
}

/// Single-bit mask selecting `id` within its byte
#[inline]
pub const fn bit_mask(id: u64) -> u8 {
    0x80 >> bit_position(id)
}

#[inline]
pub const fn is_set(byte: u8, id: u64) -> bool {
    byte & bit_mask(id) != 0
}

/// `byte` with every bit but `id`'s cleared
#[inline]
pub const fn get_bit(byte: u8, id: u64) -> u8 {
    byte & bit_mask(id)
}

#[inline]
pub const fn set_bit(byte: u8, id: u64) -> u8 {
    byte | bit_mask(id)
}

#[inline]
pub const fn unset_bit(byte: u8, id: u64) -> u8 {
    byte & !bit_mask(id)
}

/// `byte` with `id`'s bit forced to `state`
#[inline]
pub const fn apply(byte: u8, id: u64, state: bool) -> u8 {
    if state {
        set_bit(byte, id)
    } else {
        unset_bit(byte, id)
    }
}

/// Index of the first clear bit in `byte`, or `None` if all eight are set
#[inline]
pub const fn first_zero_bit(byte: u8) -> Option<u32> {
    if byte == u8::MAX {
        None
    } else {
        Some((!byte).leading_zeros())
    }
}
