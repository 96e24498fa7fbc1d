//! # Daily Post
//!
//! Posts one processing date's transactions against an account master file
//! stored as fixed-width binary records with packed-decimal amounts, and
//! produces the updated account file plus a file of rejected withdrawals.
//!
//! ## Design Principles
//!
//! - **Exact money**: amounts are integer minor units, never floating point
//! - **Byte-exact codec**: 58-byte account and 72-byte transaction layouts
//!   round-trip exactly; values that do not fit fail instead of truncating
//! - **Merge-join posting**: accounts and transactions are sorted once and
//!   walked in step, so results depend only on the inputs
//! - **Explicit processing date**: the engine never reads a clock
//!
//! ## Example
//!
//! ```
//! use daily_post::{
//!     AccountRecord, CalendarDate, Money, PostingConfig, PostingEngine, Timestamp,
//!     TransactionCode, TransactionRecord,
//! };
//!
//! let accounts = vec![AccountRecord::new("A1", Money::from_minor(10000), Money::from_minor(5000))];
//! let transactions = vec![TransactionRecord::new(
//!     "A1",
//!     "T1",
//!     TransactionCode::Withdraw,
//!     Money::from_minor(20000),
//!     Timestamp::new(20250101_090000),
//! )];
//!
//! let engine = PostingEngine::new(PostingConfig::new(CalendarDate::new(20250101)));
//! let outcome = engine.post(accounts, transactions);
//! assert_eq!(outcome.accounts[0].balance.to_string(), "100.00");
//! assert_eq!(outcome.exceptions.len(), 1);
//! ```

pub mod account;
mod codec;
pub mod date;
pub mod dump;
pub mod engine;
pub mod error;
pub mod io;
pub mod money;
pub mod packed;
pub mod runner;
pub mod transaction;

pub use account::{AccountRecord, ACCOUNT_RECORD_LEN};
pub use date::{CalendarDate, Timestamp};
pub use engine::{PostingConfig, PostingEngine, PostingOutcome, PostingSummary};
pub use error::{PostingError, Result};
pub use money::Money;
pub use runner::{run, RunConfig};
pub use transaction::{TransactionCode, TransactionRecord, TRANSACTION_RECORD_LEN};
