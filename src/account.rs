//! Account records and their 58-byte fixed-width layout.
//!
//! | bytes     | field            | encoding                     |
//! |-----------|------------------|------------------------------|
//! | `[0,12)`  | account ID       | text                         |
//! | `[12,24)` | customer ID      | text                         |
//! | `[24,28)` | product code     | text                         |
//! | `[28,29)` | status           | text                         |
//! | `[29,36)` | current balance  | packed, 13 digits (2 implied)|
//! | `[36,42)` | overdraft limit  | packed, 11 digits (2 implied)|
//! | `[42,50)` | open date        | `YYYYMMDD`                   |
//! | `[50,58)` | close date       | `YYYYMMDD`                   |

use crate::codec::{self, DigitField, PackedField, TextField};
use crate::date::CalendarDate;
use crate::error::{PostingError, Result};
use crate::money::Money;

/// Length in bytes of one encoded account record.
pub const ACCOUNT_RECORD_LEN: usize = 58;

const ACCOUNT_ID: TextField = TextField::new("account ID", 0, 12);
const CUSTOMER_ID: TextField = TextField::new("customer ID", 12, 12);
const PRODUCT_CODE: TextField = TextField::new("product code", 24, 4);
const STATUS: TextField = TextField::new("status", 28, 1);
const BALANCE: PackedField = PackedField::new("current balance", 29, 13);
const OVERDRAFT_LIMIT: PackedField = PackedField::new("overdraft limit", 36, 11);
const OPEN_DATE: DigitField = DigitField::new("open date", 42, 8);
const CLOSE_DATE: DigitField = DigitField::new("close date", 50, 8);

/// One account as stored in the account file.
///
/// # Overdraft Rule
///
/// The balance may go below zero by at most `overdraft_limit`. Withdrawals
/// that would breach this are refused by [`AccountRecord::withdraw`]; every
/// other movement is unconditional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Primary key, unique across the account file.
    pub account_id: String,

    pub customer_id: String,

    pub product_code: String,

    pub status: String,

    /// Current balance. May be negative down to `-overdraft_limit`.
    pub balance: Money,

    /// How far below zero the balance may go.
    pub overdraft_limit: Money,

    pub open_date: CalendarDate,

    pub close_date: CalendarDate,
}

impl AccountRecord {
    /// Creates an account with the given key, balance and overdraft limit.
    ///
    /// Descriptive fields start blank and dates start at zero.
    pub fn new(account_id: impl Into<String>, balance: Money, overdraft_limit: Money) -> Self {
        AccountRecord {
            account_id: account_id.into(),
            customer_id: String::new(),
            product_code: String::new(),
            status: String::new(),
            balance,
            overdraft_limit,
            open_date: CalendarDate::default(),
            close_date: CalendarDate::default(),
        }
    }

    /// Decodes the first [`ACCOUNT_RECORD_LEN`] bytes of `record`.
    pub fn decode(record: &[u8]) -> Result<Self> {
        codec::check_len(record, ACCOUNT_RECORD_LEN)?;

        Ok(AccountRecord {
            account_id: ACCOUNT_ID.read(record)?,
            customer_id: CUSTOMER_ID.read(record)?,
            product_code: PRODUCT_CODE.read(record)?,
            status: STATUS.read(record)?,
            balance: BALANCE.read(record)?,
            overdraft_limit: OVERDRAFT_LIMIT.read(record)?,
            open_date: read_date(OPEN_DATE, record)?,
            close_date: read_date(CLOSE_DATE, record)?,
        })
    }

    /// Encodes the account into exactly [`ACCOUNT_RECORD_LEN`] bytes.
    pub fn encode(&self) -> Result<[u8; ACCOUNT_RECORD_LEN]> {
        let mut out = [b' '; ACCOUNT_RECORD_LEN];

        ACCOUNT_ID.write(&mut out, &self.account_id)?;
        CUSTOMER_ID.write(&mut out, &self.customer_id)?;
        PRODUCT_CODE.write(&mut out, &self.product_code)?;
        STATUS.write(&mut out, &self.status)?;
        BALANCE.write(&mut out, self.balance)?;
        OVERDRAFT_LIMIT.write(&mut out, self.overdraft_limit)?;
        OPEN_DATE.write(&mut out, u64::from(self.open_date.value()))?;
        CLOSE_DATE.write(&mut out, u64::from(self.close_date.value()))?;

        Ok(out)
    }

    /// Adds `amount` to the balance.
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Subtracts `amount` from the balance with no overdraft check.
    pub fn debit(&mut self, amount: Money) {
        self.balance -= amount;
    }

    /// Withdraws `amount` if the result stays at or above `-overdraft_limit`.
    ///
    /// Returns `false` and leaves the balance untouched otherwise.
    pub fn withdraw(&mut self, amount: Money) -> bool {
        let candidate = self.balance - amount;
        if candidate < -self.overdraft_limit {
            return false;
        }

        self.balance = candidate;
        true
    }
}

fn read_date(field: DigitField, record: &[u8]) -> Result<CalendarDate> {
    let value = field.read(record)?;
    u32::try_from(value)
        .map(CalendarDate::new)
        .map_err(|_| PostingError::Format {
            field: field.name,
            reason: format!("{} is not a date", value),
        })
}
