//! Packed-decimal ("COMP-3") numeric fields.
//!
//! Every nibble but the last holds one decimal digit, most significant
//! first; the last nibble holds the sign. A field declared with `digits`
//! digits occupies `digits / 2 + 1` bytes, with a leading zero nibble when
//! `digits` is even.

use thiserror::Error;

/// Sign nibble written for non-negative values.
pub const SIGN_POSITIVE: u8 = 0x0C;

/// Sign nibble written for negative values.
pub const SIGN_NEGATIVE: u8 = 0x0D;

/// Failures of the packed-decimal codec, before a field name is attached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackedError {
    #[error("{value} needs {needed} digits, field holds {digits}")]
    Overflow {
        value: i64,
        needed: usize,
        digits: usize,
    },

    #[error("buffer of {actual} bytes cannot hold a {expected}-byte packed field")]
    Width { expected: usize, actual: usize },

    #[error("nibble {nibble:#x} at position {position} is not a decimal digit")]
    InvalidDigit { nibble: u8, position: usize },

    #[error("nibble {0:#x} is not a sign")]
    InvalidSign(u8),

    #[error("magnitude exceeds a 64-bit value")]
    TooLong,

    #[error("empty packed field")]
    Empty,
}

/// Number of bytes a packed field of `digits` digits occupies.
pub const fn packed_len(digits: usize) -> usize {
    digits / 2 + 1
}

/// Packs `value` into a freshly allocated field of `digits` digits.
pub fn pack(value: i64, digits: usize) -> Result<Vec<u8>, PackedError> {
    let mut out = vec![0u8; packed_len(digits)];
    pack_into(value, digits, &mut out)?;
    Ok(out)
}

/// Packs `value` into `out`, which must be exactly `packed_len(digits)` bytes.
///
/// Fails with [`PackedError::Overflow`] instead of dropping high-order digits.
pub fn pack_into(value: i64, digits: usize, out: &mut [u8]) -> Result<(), PackedError> {
    let magnitude = value.unsigned_abs();
    let needed = digit_count(magnitude);
    if needed > digits {
        return Err(PackedError::Overflow {
            value,
            needed,
            digits,
        });
    }
    let expected = packed_len(digits);
    if out.len() != expected {
        return Err(PackedError::Width {
            expected,
            actual: out.len(),
        });
    }

    out.fill(0);
    let sign = if value < 0 { SIGN_NEGATIVE } else { SIGN_POSITIVE };
    set_nibble_from_right(out, 0, sign);

    let mut rest = magnitude;
    for position in 1..=digits {
        set_nibble_from_right(out, position, (rest % 10) as u8);
        rest /= 10;
    }

    Ok(())
}

/// Unpacks a field into a signed integer; leading zero digits are discarded.
///
/// `0xD` and `0xB` mark a negative value, `0xA`, `0xC`, `0xE` and `0xF` a
/// non-negative one.
pub fn unpack(bytes: &[u8]) -> Result<i64, PackedError> {
    let (&last, leading) = bytes.split_last().ok_or(PackedError::Empty)?;

    let digit_nibbles = leading
        .iter()
        .flat_map(|&byte| [byte >> 4, byte & 0x0F])
        .chain(std::iter::once(last >> 4));

    let mut magnitude: u64 = 0;
    for (position, nibble) in digit_nibbles.enumerate() {
        if nibble > 9 {
            return Err(PackedError::InvalidDigit { nibble, position });
        }
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(u64::from(nibble)))
            .ok_or(PackedError::TooLong)?;
    }

    let negative = match last & 0x0F {
        0x0B | 0x0D => true,
        0x0A | 0x0C | 0x0E | 0x0F => false,
        other => return Err(PackedError::InvalidSign(other)),
    };

    let magnitude = i64::try_from(magnitude).map_err(|_| PackedError::TooLong)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn digit_count(mut n: u64) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

// Position 0 is the sign nibble (low half of the last byte).
fn set_nibble_from_right(out: &mut [u8], position: usize, nibble: u8) {
    let index = out.len() - 1 - position / 2;
    if position % 2 == 0 {
        out[index] |= nibble & 0x0F;
    } else {
        out[index] |= (nibble & 0x0F) << 4;
    }
}
