//! Channel scaling helpers for packed 16 bpp samples.
//!
//! The bit-replication tables and `shift_signed` are forked from zune-bmp
//! 0.5.2 by Caleb Etemesi (MIT/Apache-2.0/Zlib).

/// Rescale an `n`-bit channel value to 0–255 as `value * 255 / max`.
#[inline]
pub(crate) fn rescale(value: u16, max: u16) -> u8 {
    (u32::from(value) * 255 / u32::from(max)) as u8
}

/// Bit-replication multipliers for converting N-bit values to 8-bit.
const MUL_TABLE: [u32; 9] = [
    0,    // 0 bits
    0xff, // 1 bit:  0b11111111
    0x55, // 2 bits: 0b01010101
    0x49, // 3 bits: 0b01001001
    0x11, // 4 bits: 0b00010001
    0x21, // 5 bits: 0b00100001
    0x41, // 6 bits: 0b01000001
    0x81, // 7 bits: 0b10000001
    0x01, // 8 bits: 0b00000001
];

const SHIFT_TABLE: [i32; 9] = [0, 0, 0, 1, 0, 2, 4, 6, 0];

/// Shift that moves the top bit of `mask` to bit 7.
#[inline]
pub(crate) fn mask_shift(mask: u32) -> i32 {
    (32 - mask.leading_zeros() as i32) - 8
}

/// Extract and scale a masked field to 8-bit range.
///
/// `v` is the sample already ANDed with the mask, `shift` comes from
/// [`mask_shift`] and `bits` is the mask's popcount.
#[inline]
pub(crate) fn shift_signed(mut v: u32, shift: i32, bits: u32) -> u32 {
    if shift < 0 {
        v <<= -shift;
    } else {
        v >>= shift;
    }
    let bits = bits.min(8);
    if bits == 0 {
        return 0;
    }
    v >>= 8 - bits;
    (v.wrapping_mul(MUL_TABLE[bits as usize])) >> SHIFT_TABLE[bits as usize]
}
