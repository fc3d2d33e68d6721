//! Scan kernels
//!
//! Word-at-a-time routines over one chunk of the bitmap. Words are read
//! big-endian so that the most significant bit of a word is the lowest ID,
//! matching the MSB-first order inside each byte.

use bytes::Buf;

use crate::config::WORD_SIZE;

use super::bits;

/// Number of set bits in `chunk`
pub(crate) fn count_ones(mut chunk: &[u8]) -> u64 {
    let mut count = 0u64;
    while chunk.remaining() >= WORD_SIZE {
        count += u64::from(chunk.get_u64().count_ones());
    }
    count + chunk.iter().map(|b| u64::from(b.count_ones())).sum::<u64>()
}

/// Bit offset (relative to the chunk start) of the first clear bit
pub(crate) fn first_zero_bit(mut chunk: &[u8]) -> Option<u64> {
    let mut base = 0u64;

    while chunk.remaining() >= WORD_SIZE {
        let word = chunk.get_u64();
        if word != u64::MAX {
            return Some(base + u64::from((!word).leading_zeros()));
        }
        base += 64;
    }

    for &byte in chunk {
        if let Some(bit) = bits::first_zero_bit(byte) {
            return Some(base + u64::from(bit));
        }
        base += bits::BITS_PER_BYTE;
    }

    None
}

/// Pop the most significant set bit of `word`, returning its index from the top
#[inline]
pub(crate) fn take_leading_bit(word: &mut u64) -> Option<u32> {
    if *word == 0 {
        return None;
    }
    let lz = word.leading_zeros();
    *word &= !(1u64 << (63 - lz));
    Some(lz)
}
