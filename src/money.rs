//! Fixed-point money with exactly two fractional digits.
//!
//! Values are held as a signed count of minor units (cents). Arithmetic and
//! comparison are plain integer operations; `rust_decimal` is only involved
//! when converting to and from text.

use crate::error::{PostingError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount counted in minor units.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use daily_post::Money;
///
/// let balance = Money::from_str("100.00").unwrap();
/// let fee = Money::from_minor(250);
/// assert_eq!((balance - fee).to_string(), "97.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Number of fractional decimal digits.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(0);

    /// Creates an amount from a count of minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the amount as a count of minor units.
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this value is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }
}

impl FromStr for Money {
    type Err = PostingError;

    /// Parses decimal text such as `"130"`, `"-70.5"` or `"0.01"`.
    ///
    /// Sub-cent precision is rejected rather than rounded.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PostingError::InvalidAmount(s.to_string());

        let decimal = Decimal::from_str(s.trim()).map_err(|_| invalid())?;
        let minor = decimal
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(invalid)?;
        if !minor.fract().is_zero() {
            return Err(invalid());
        }
        minor.to_i64().map(Money).ok_or_else(invalid)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
