//! Daily posting engine.
//!
//! Applies one processing date's transactions to the account collection
//! with a sorted merge-join: accounts ordered by ID, transactions ordered by
//! (account ID, timestamp, transaction ID), both walked once in step.
//! Everything is in memory and synchronous; the engine never reads a clock
//! and never touches the filesystem.

use crate::account::AccountRecord;
use crate::date::CalendarDate;
use crate::transaction::{TransactionCode, TransactionRecord};
use log::{debug, warn};

/// Inputs to a posting run besides the two record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingConfig {
    /// Only transactions whose effective date equals this are applied.
    pub processing_date: CalendarDate,
}

impl PostingConfig {
    pub fn new(processing_date: CalendarDate) -> Self {
        PostingConfig { processing_date }
    }
}

/// Counts of what happened to each transaction in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostingSummary {
    pub accounts: usize,
    pub transactions: usize,
    /// Balance changed.
    pub applied: usize,
    /// Withdrawals refused by the overdraft rule; these are the exceptions.
    pub rejected: usize,
    /// Effective date differs from the processing date.
    pub wrong_date: usize,
    /// No account with the transaction's account ID.
    pub unmatched: usize,
    /// Dated correctly but carrying a code with no defined effect.
    pub unknown_code: usize,
}

/// Result of a posting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingOutcome {
    /// Every input account, sorted by account ID, balances updated.
    pub accounts: Vec<AccountRecord>,

    /// Rejected transactions, unchanged, in posting order.
    pub exceptions: Vec<TransactionRecord>,

    pub summary: PostingSummary,
}

/// What a single transaction did to its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Applied,
    Rejected,
    WrongDate,
    UnknownCode,
}

/// The posting engine.
///
/// Holds only its configuration; each call to [`PostingEngine::post`] takes
/// ownership of its collections, so independent runs can proceed on
/// separate threads without sharing state.
///
/// # Ordering
///
/// Same-day transactions against one account are applied in (timestamp,
/// transaction ID) order regardless of their order in the input, and each
/// one sees the balance left by the previous one.
#[derive(Debug, Clone)]
pub struct PostingEngine {
    config: PostingConfig,
}

impl PostingEngine {
    /// Creates an engine for the given configuration.
    pub fn new(config: PostingConfig) -> Self {
        PostingEngine { config }
    }

    pub fn config(&self) -> &PostingConfig {
        &self.config
    }

    /// Posts `transactions` against `accounts`.
    ///
    /// Account IDs are expected to be unique. Transactions for unknown
    /// accounts or other dates are skipped and never become exceptions.
    pub fn post(
        &self,
        mut accounts: Vec<AccountRecord>,
        mut transactions: Vec<TransactionRecord>,
    ) -> PostingOutcome {
        accounts.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        transactions.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        warn_on_duplicate_keys(&transactions);

        let mut summary = PostingSummary {
            accounts: accounts.len(),
            transactions: transactions.len(),
            ..PostingSummary::default()
        };
        let mut exceptions = Vec::new();
        let mut pending = transactions.into_iter().peekable();

        for account in accounts.iter_mut() {
            while let Some(tx) = pending.next_if(|tx| tx.account_id < account.account_id) {
                skip_unmatched(&tx, &mut summary);
            }

            while let Some(tx) = pending.next_if(|tx| tx.account_id == account.account_id) {
                match self.apply(account, &tx) {
                    Disposition::Applied => summary.applied += 1,
                    Disposition::Rejected => {
                        summary.rejected += 1;
                        exceptions.push(tx);
                    }
                    Disposition::WrongDate => summary.wrong_date += 1,
                    Disposition::UnknownCode => summary.unknown_code += 1,
                }
            }
        }

        for tx in pending {
            skip_unmatched(&tx, &mut summary);
        }

        PostingOutcome {
            accounts,
            exceptions,
            summary,
        }
    }

    /// Applies one transaction to its (matching) account.
    fn apply(&self, account: &mut AccountRecord, tx: &TransactionRecord) -> Disposition {
        let effective = tx.effective_date();
        if effective != self.config.processing_date {
            debug!(
                "Transaction {}: effective date {} is not {}, skipping",
                tx.transaction_id, effective, self.config.processing_date
            );
            return Disposition::WrongDate;
        }

        match &tx.code {
            TransactionCode::Deposit | TransactionCode::Fee | TransactionCode::Interest => {
                account.credit(tx.amount);
                debug!(
                    "Transaction {}: {} credited {} to {}, balance {}",
                    tx.transaction_id, tx.code, tx.amount, account.account_id, account.balance
                );
                Disposition::Applied
            }
            TransactionCode::Reversal => {
                account.debit(tx.amount);
                debug!(
                    "Transaction {}: reversal debited {} from {}, balance {}",
                    tx.transaction_id, tx.amount, account.account_id, account.balance
                );
                Disposition::Applied
            }
            TransactionCode::Withdraw => {
                if account.withdraw(tx.amount) {
                    debug!(
                        "Transaction {}: withdrew {} from {}, balance {}",
                        tx.transaction_id, tx.amount, account.account_id, account.balance
                    );
                    Disposition::Applied
                } else {
                    debug!(
                        "Transaction {}: withdrawal of {} from {} exceeds overdraft limit {} (balance {}), rejected",
                        tx.transaction_id,
                        tx.amount,
                        account.account_id,
                        account.overdraft_limit,
                        account.balance
                    );
                    Disposition::Rejected
                }
            }
            TransactionCode::Other(code) => {
                warn!(
                    "Transaction {}: unknown code {:?} for account {}, no effect",
                    tx.transaction_id, code, account.account_id
                );
                Disposition::UnknownCode
            }
        }
    }
}

fn skip_unmatched(tx: &TransactionRecord, summary: &mut PostingSummary) {
    warn!(
        "Transaction {}: no account {:?}, dropping",
        tx.transaction_id, tx.account_id
    );
    summary.unmatched += 1;
}

fn warn_on_duplicate_keys(sorted: &[TransactionRecord]) {
    for pair in sorted.windows(2) {
        if pair[0].sort_key() == pair[1].sort_key() {
            warn!(
                "Transaction {} appears twice for account {} at {}; order between copies is input order",
                pair[1].transaction_id, pair[1].account_id, pair[1].timestamp
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Timestamp;
    use crate::money::Money;
    use std::str::FromStr;

    const TODAY: CalendarDate = CalendarDate::new(20250101);

    fn dec(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn account(id: &str, balance: &str, limit: &str) -> AccountRecord {
        AccountRecord::new(id, dec(balance), dec(limit))
    }

    fn tx(account_id: &str, id: &str, code: &str, amount: &str, ts: u64) -> TransactionRecord {
        TransactionRecord::new(
            account_id,
            id,
            TransactionCode::parse(code),
            dec(amount),
            Timestamp::new(ts),
        )
    }

    fn post(accounts: Vec<AccountRecord>, txs: Vec<TransactionRecord>) -> PostingOutcome {
        PostingEngine::new(PostingConfig::new(TODAY)).post(accounts, txs)
    }

    #[test]
    fn test_credits_and_reversal() {
        let outcome = post(
            vec![account("A1", "100.00", "0.00")],
            vec![
                tx("A1", "T1", "DEPO", "10.00", 20250101_080000),
                tx("A1", "T2", "FEE ", "1.50", 20250101_080100),
                tx("A1", "T3", "INT ", "0.25", 20250101_080200),
                tx("A1", "T4", "REV ", "200.00", 20250101_080300),
            ],
        );

        assert_eq!(outcome.accounts[0].balance, dec("-88.25"));
        assert!(outcome.exceptions.is_empty());
        assert_eq!(outcome.summary.applied, 4);
    }

    #[test]
    fn test_accounts_returned_sorted() {
        let outcome = post(
            vec![
                account("C3", "0.00", "0.00"),
                account("A1", "0.00", "0.00"),
                account("B2", "0.00", "0.00"),
            ],
            vec![],
        );

        let ids: Vec<_> = outcome.accounts.iter().map(|a| a.account_id.as_str()).collect();
        assert_eq!(ids, ["A1", "B2", "C3"]);
    }

    #[test]
    fn test_exceptions_follow_posting_order() {
        let outcome = post(
            vec![account("B2", "0.00", "0.00"), account("A1", "0.00", "0.00")],
            vec![
                tx("B2", "T9", "WDRW", "1.00", 20250101_070000),
                tx("A1", "T5", "WDRW", "1.00", 20250101_120000),
                tx("A1", "T4", "WDRW", "1.00", 20250101_110000),
            ],
        );

        let ids: Vec<_> = outcome
            .exceptions
            .iter()
            .map(|t| t.transaction_id.as_str())
            .collect();
        assert_eq!(ids, ["T4", "T5", "T9"]);
    }

    #[test]
    fn test_transaction_id_breaks_timestamp_ties() {
        // T1 sorts before T2, so the deposit lands first and the withdrawal succeeds.
        let outcome = post(
            vec![account("A1", "0.00", "0.00")],
            vec![
                tx("A1", "T2", "WDRW", "5.00", 20250101_090000),
                tx("A1", "T1", "DEPO", "5.00", 20250101_090000),
            ],
        );

        assert_eq!(outcome.accounts[0].balance, Money::ZERO);
        assert!(outcome.exceptions.is_empty());
    }

    #[test]
    fn test_unmatched_before_between_and_after_accounts() {
        let outcome = post(
            vec![account("B", "1.00", "0.00"), account("D", "1.00", "0.00")],
            vec![
                tx("A", "T1", "DEPO", "1.00", 20250101_000000),
                tx("C", "T2", "WDRW", "99.00", 20250101_000000),
                tx("E", "T3", "WDRW", "99.00", 20250101_000000),
                tx("D", "T4", "DEPO", "1.00", 20250101_000000),
            ],
        );

        assert_eq!(outcome.accounts[0].balance, dec("1.00"));
        assert_eq!(outcome.accounts[1].balance, dec("2.00"));
        assert!(outcome.exceptions.is_empty());
        assert_eq!(outcome.summary.unmatched, 3);
        assert_eq!(outcome.summary.applied, 1);
    }

    #[test]
    fn test_unknown_code_is_a_no_op() {
        let outcome = post(
            vec![account("A1", "10.00", "0.00")],
            vec![tx("A1", "T1", "XFER", "10.00", 20250101_000000)],
        );

        assert_eq!(outcome.accounts[0].balance, dec("10.00"));
        assert!(outcome.exceptions.is_empty());
        assert_eq!(outcome.summary.unknown_code, 1);
    }

    #[test]
    fn test_summary_counts() {
        let outcome = post(
            vec![account("A1", "100.00", "50.00")],
            vec![
                tx("A1", "T1", "DEPO", "30.00", 20250101_010000),
                tx("A1", "T2", "WDRW", "200.00", 20250101_020000),
                tx("A1", "T3", "DEPO", "30.00", 20241231_235959),
                tx("ZZ", "T4", "DEPO", "30.00", 20250101_010000),
            ],
        );

        assert_eq!(
            outcome.summary,
            PostingSummary {
                accounts: 1,
                transactions: 4,
                applied: 1,
                rejected: 1,
                wrong_date: 1,
                unmatched: 1,
                unknown_code: 0,
            }
        );
    }

    #[test]
    fn test_empty_inputs() {
        let outcome = post(vec![], vec![tx("A1", "T1", "DEPO", "1.00", 20250101_000000)]);
        assert!(outcome.accounts.is_empty());
        assert!(outcome.exceptions.is_empty());
        assert_eq!(outcome.summary.unmatched, 1);
    }
}
