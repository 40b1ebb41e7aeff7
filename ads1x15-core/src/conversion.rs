//! Conversion result decoding and scaling

use crate::registers::Gain;

/// Largest positive 12-bit result after shifting
const MAX_POSITIVE_12BIT: u16 = 0x07FF;

/// Bits OR-ed in to sign-extend a 12-bit result
const SIGN_EXTENSION: u16 = 0xF000;

/// Decode a raw conversion register value
///
/// Shifts right by `bit_shift`. For a non-zero shift (ADS1015) the
/// 12-bit two's complement value is sign-extended to 16 bits.
pub const fn decode_conversion(raw: u16, bit_shift: u8) -> i16 {
    let res = raw >> bit_shift;
    if bit_shift == 0 {
        return res as i16;
    }
    if res > MAX_POSITIVE_12BIT {
        (res | SIGN_EXTENSION) as i16
    } else {
        res as i16
    }
}

/// Volts represented by `counts` for a given full-scale range
///
/// `counts * (full_scale / (32768 >> bit_shift))`
pub fn counts_to_volts(counts: i16, full_scale_volts: f32, bit_shift: u8) -> f32 {
    let steps = (32768u32 >> bit_shift) as f32;
    counts as f32 * (full_scale_volts / steps)
}

/// Volts represented by `counts` at `gain`
pub fn compute_volts(counts: i16, gain: Gain, bit_shift: u8) -> f32 {
    counts_to_volts(counts, gain.full_scale_volts(), bit_shift)
}

/// Left-justify a comparator threshold for the threshold registers
pub const fn encode_threshold(value: i16, bit_shift: u8) -> u16 {
    (value as u16) << bit_shift
}
