//! Transaction records and their 72-byte fixed-width layout.
//!
//! The exception file uses the same layout, since a rejected transaction is
//! written back exactly as it was read.

use crate::codec::{self, DigitField, PackedField, TextField};
use crate::date::{CalendarDate, Timestamp};
use crate::error::Result;
use crate::money::Money;
use std::fmt;

/// Length in bytes of one encoded transaction record.
pub const TRANSACTION_RECORD_LEN: usize = 72;

const ACCOUNT_ID: TextField = TextField::new("account ID", 0, 12);
const TRANSACTION_ID: TextField = TextField::new("transaction ID", 12, 16);
const ORIGINAL_ID: TextField = TextField::new("originating transaction ID", 28, 16);
const CODE: TextField = TextField::new("transaction code", 44, 4);
const AMOUNT: PackedField = PackedField::new("amount", 48, 11);
const TIMESTAMP: DigitField = DigitField::new("timestamp", 54, 14);
const CHANNEL: TextField = TextField::new("channel", 68, 4);

/// Transaction code with its effect on the balance.
///
/// Codes outside the known vocabulary are kept verbatim so they survive a
/// decode/encode round trip; the engine gives them no effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionCode {
    /// `DEPO`: credit the amount.
    Deposit,

    /// `WDRW`: debit the amount, subject to the overdraft limit.
    Withdraw,

    /// `FEE `: credit the amount.
    Fee,

    /// `INT `: credit the amount.
    Interest,

    /// `REV `: debit the amount unconditionally.
    Reversal,

    /// Anything else, trailing spaces trimmed.
    Other(String),
}

impl TransactionCode {
    /// Maps a record code (with or without trailing padding) to its variant.
    pub fn parse(code: &str) -> Self {
        match code.trim_end_matches(' ') {
            "DEPO" => TransactionCode::Deposit,
            "WDRW" => TransactionCode::Withdraw,
            "FEE" => TransactionCode::Fee,
            "INT" => TransactionCode::Interest,
            "REV" => TransactionCode::Reversal,
            other => TransactionCode::Other(other.to_string()),
        }
    }

    /// The code as stored in the record, without padding.
    pub fn as_str(&self) -> &str {
        match self {
            TransactionCode::Deposit => "DEPO",
            TransactionCode::Withdraw => "WDRW",
            TransactionCode::Fee => "FEE",
            TransactionCode::Interest => "INT",
            TransactionCode::Reversal => "REV",
            TransactionCode::Other(code) => code,
        }
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested posting, as stored in the transaction file.
///
/// Transactions are never modified by posting; a rejected one is copied
/// unchanged into the exception file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Account the posting targets. Need not exist in the account file.
    pub account_id: String,

    pub transaction_id: String,

    /// Transaction this one reverses, if any. Carried through only.
    pub original_id: String,

    pub code: TransactionCode,

    /// Magnitude of the posting; the code decides the direction.
    pub amount: Money,

    pub timestamp: Timestamp,

    pub channel: String,
}

impl TransactionRecord {
    /// Creates a transaction with blank originating ID and channel.
    pub fn new(
        account_id: impl Into<String>,
        transaction_id: impl Into<String>,
        code: TransactionCode,
        amount: Money,
        timestamp: Timestamp,
    ) -> Self {
        TransactionRecord {
            account_id: account_id.into(),
            transaction_id: transaction_id.into(),
            original_id: String::new(),
            code,
            amount,
            timestamp,
            channel: String::new(),
        }
    }

    /// Decodes the first [`TRANSACTION_RECORD_LEN`] bytes of `record`.
    pub fn decode(record: &[u8]) -> Result<Self> {
        codec::check_len(record, TRANSACTION_RECORD_LEN)?;

        Ok(TransactionRecord {
            account_id: ACCOUNT_ID.read(record)?,
            transaction_id: TRANSACTION_ID.read(record)?,
            original_id: ORIGINAL_ID.read(record)?,
            code: TransactionCode::parse(&CODE.read(record)?),
            amount: AMOUNT.read(record)?,
            timestamp: Timestamp::new(TIMESTAMP.read(record)?),
            channel: CHANNEL.read(record)?,
        })
    }

    /// Encodes the transaction into exactly [`TRANSACTION_RECORD_LEN`] bytes.
    pub fn encode(&self) -> Result<[u8; TRANSACTION_RECORD_LEN]> {
        let mut out = [b' '; TRANSACTION_RECORD_LEN];

        ACCOUNT_ID.write(&mut out, &self.account_id)?;
        TRANSACTION_ID.write(&mut out, &self.transaction_id)?;
        ORIGINAL_ID.write(&mut out, &self.original_id)?;
        CODE.write(&mut out, self.code.as_str())?;
        AMOUNT.write(&mut out, self.amount)?;
        TIMESTAMP.write(&mut out, self.timestamp.value())?;
        CHANNEL.write(&mut out, &self.channel)?;

        Ok(out)
    }

    /// Calendar date the transaction takes effect on.
    pub fn effective_date(&self) -> CalendarDate {
        self.timestamp.date()
    }

    /// Posting order: account, then timestamp, then transaction ID.
    pub fn sort_key(&self) -> (&str, Timestamp, &str) {
        (&self.account_id, self.timestamp, &self.transaction_id)
    }
}
