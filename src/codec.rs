//! Fixed-width field readers and writers shared by the record layouts.
//!
//! Each field knows its name, byte offset and width, so every failure can
//! say which slot of the record was at fault. Text is space padded on the
//! right and trimmed of trailing spaces on the way back in; dates and
//! timestamps are zero-padded ASCII digits; amounts are packed decimal.

use crate::error::{PostingError, Result};
use crate::money::Money;
use crate::packed::{self, PackedError};
use std::ops::Range;

/// Fails with [`PostingError::ShortRecord`] if `record` is shorter than `expected`.
pub(crate) fn check_len(record: &[u8], expected: usize) -> Result<()> {
    if record.len() < expected {
        return Err(PostingError::ShortRecord {
            expected,
            actual: record.len(),
        });
    }
    Ok(())
}

fn slice<'a>(record: &'a [u8], span: Range<usize>) -> Result<&'a [u8]> {
    let end = span.end;
    record.get(span).ok_or(PostingError::ShortRecord {
        expected: end,
        actual: record.len(),
    })
}

fn slice_mut<'a>(out: &'a mut [u8], span: Range<usize>) -> Result<&'a mut [u8]> {
    let end = span.end;
    let actual = out.len();
    out.get_mut(span).ok_or(PostingError::ShortRecord {
        expected: end,
        actual,
    })
}

/// Space-padded ASCII text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextField {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl TextField {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        TextField {
            name,
            offset,
            width,
        }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub fn read(&self, record: &[u8]) -> Result<String> {
        let raw = slice(record, self.offset..self.end())?;
        if !raw.is_ascii() {
            return Err(PostingError::Format {
                field: self.name,
                reason: format!("non-ASCII bytes {:02x?}", raw),
            });
        }
        let text: String = raw.iter().map(|&b| char::from(b)).collect();
        Ok(text.trim_end_matches(' ').to_string())
    }

    /// Writes `value` left-aligned; an over-wide value is an overflow, never truncated.
    pub fn write(&self, out: &mut [u8], value: &str) -> Result<()> {
        if !value.is_ascii() {
            return Err(PostingError::Overflow {
                field: self.name,
                reason: format!("{:?} is not ASCII", value),
            });
        }
        if value.len() > self.width {
            return Err(PostingError::Overflow {
                field: self.name,
                reason: format!(
                    "{:?} is {} bytes, field holds {}",
                    value,
                    value.len(),
                    self.width
                ),
            });
        }

        let slot = slice_mut(out, self.offset..self.end())?;
        slot.fill(b' ');
        slot[..value.len()].copy_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Zero-padded unsigned ASCII digits (dates and timestamps).
#[derive(Debug, Clone, Copy)]
pub(crate) struct DigitField {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl DigitField {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        DigitField {
            name,
            offset,
            width,
        }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    pub fn read(&self, record: &[u8]) -> Result<u64> {
        let raw = slice(record, self.offset..self.end())?;
        if !raw.iter().all(u8::is_ascii_digit) {
            return Err(PostingError::Format {
                field: self.name,
                reason: format!(
                    "non-numeric text {:?}",
                    String::from_utf8_lossy(raw)
                ),
            });
        }
        Ok(raw
            .iter()
            .fold(0u64, |acc, &b| acc * 10 + u64::from(b - b'0')))
    }

    pub fn write(&self, out: &mut [u8], value: u64) -> Result<()> {
        let text = format!("{:0width$}", value, width = self.width);
        if text.len() > self.width {
            return Err(PostingError::Overflow {
                field: self.name,
                reason: format!("{} needs {} digits, field holds {}", value, text.len(), self.width),
            });
        }

        slice_mut(out, self.offset..self.end())?.copy_from_slice(text.as_bytes());
        Ok(())
    }
}

/// Packed-decimal money with two implied fractional digits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PackedField {
    pub name: &'static str,
    pub offset: usize,
    pub digits: usize,
}

impl PackedField {
    pub const fn new(name: &'static str, offset: usize, digits: usize) -> Self {
        PackedField {
            name,
            offset,
            digits,
        }
    }

    pub const fn width(&self) -> usize {
        packed::packed_len(self.digits)
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width()
    }

    pub fn read(&self, record: &[u8]) -> Result<Money> {
        let raw = slice(record, self.offset..self.end())?;
        packed::unpack(raw)
            .map(Money::from_minor)
            .map_err(|e| self.error(e))
    }

    pub fn write(&self, out: &mut [u8], value: Money) -> Result<()> {
        let slot = slice_mut(out, self.offset..self.end())?;
        packed::pack_into(value.minor(), self.digits, slot).map_err(|e| self.error(e))
    }

    fn error(&self, e: PackedError) -> PostingError {
        match e {
            PackedError::Overflow { .. } | PackedError::TooLong => PostingError::Overflow {
                field: self.name,
                reason: e.to_string(),
            },
            _ => PostingError::Format {
                field: self.name,
                reason: e.to_string(),
            },
        }
    }
}
