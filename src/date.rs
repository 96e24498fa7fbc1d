//! Calendar dates and timestamps in their fixed numeric record forms.

use crate::error::{PostingError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar date in `YYYYMMDD` numeric form.
///
/// Record dates are carried as-is (an all-zero close date is legal); only
/// dates parsed from text are checked for a plausible month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CalendarDate(u32);

impl CalendarDate {
    /// Largest value an 8-digit field can hold.
    pub const MAX: u32 = 99_999_999;

    pub const fn new(yyyymmdd: u32) -> Self {
        CalendarDate(yyyymmdd)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for CalendarDate {
    type Err = PostingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || PostingError::InvalidDate(s.to_string());

        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = s.parse().map_err(|_| invalid())?;
        let month = value / 100 % 100;
        let day = value % 100;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid());
        }
        Ok(CalendarDate(value))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A point in time in `YYYYMMDDHHMMSS` numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Largest value a 14-digit field can hold.
    pub const MAX: u64 = 99_999_999_999_999;

    pub const fn new(yyyymmddhhmmss: u64) -> Self {
        Timestamp(yyyymmddhhmmss)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// The calendar-date portion, i.e. the transaction's effective date.
    pub const fn date(self) -> CalendarDate {
        CalendarDate((self.0 / 1_000_000) as u32)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:014}", self.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_processing_date() {
        let date = CalendarDate::from_str("20250101").unwrap();
        assert_eq!(date.value(), 20250101);
        assert_eq!(date.to_string(), "20250101");
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        for bad in ["2025011", "2025-01-01", "20251301", "20250100", "abcdefgh"] {
            assert!(
                matches!(CalendarDate::from_str(bad), Err(PostingError::InvalidDate(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_timestamp_effective_date() {
        let ts = Timestamp::new(20250101_235959);
        assert_eq!(ts.date(), CalendarDate::new(20250101));
        assert_eq!(Timestamp::new(20250102_000000).date(), CalendarDate::new(20250102));
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(CalendarDate::new(0).to_string(), "00000000");
        assert_eq!(Timestamp::new(1).to_string(), "00000000000001");
    }
}
