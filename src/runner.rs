//! File-level posting run: load both record files, post, write both outputs.

use crate::account::AccountRecord;
use crate::date::CalendarDate;
use crate::engine::{PostingConfig, PostingEngine, PostingSummary};
use crate::error::{PostingError, Result};
use crate::io::{read_records, write_records, FixedRecord};
use crate::transaction::TransactionRecord;
use log::info;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const DEFAULT_ACCOUNTS_IN: &str = "data/accounts.dat";
pub const DEFAULT_TRANSACTIONS_IN: &str = "data/txns.dat";
pub const DEFAULT_ACCOUNTS_OUT: &str = "out/accounts_out.dat";
pub const DEFAULT_EXCEPTIONS_OUT: &str = "out/exceptions.dat";

/// Everything a posting run needs. The processing date has no default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub processing_date: CalendarDate,
    pub accounts_in: PathBuf,
    pub transactions_in: PathBuf,
    pub accounts_out: PathBuf,
    pub exceptions_out: PathBuf,
}

impl RunConfig {
    /// Creates a configuration using the default file locations.
    pub fn new(processing_date: CalendarDate) -> Self {
        RunConfig {
            processing_date,
            accounts_in: PathBuf::from(DEFAULT_ACCOUNTS_IN),
            transactions_in: PathBuf::from(DEFAULT_TRANSACTIONS_IN),
            accounts_out: PathBuf::from(DEFAULT_ACCOUNTS_OUT),
            exceptions_out: PathBuf::from(DEFAULT_EXCEPTIONS_OUT),
        }
    }
}

/// Runs one posting.
///
/// Both outputs are fully encoded before either file is created, so an
/// unencodable record leaves no partial output behind.
pub fn run(config: &RunConfig) -> Result<PostingSummary> {
    let accounts: Vec<AccountRecord> = read_file(&config.accounts_in)?;
    check_unique_ids(&accounts)?;
    let transactions: Vec<TransactionRecord> = read_file(&config.transactions_in)?;
    info!(
        "Loaded {} accounts from {} and {} transactions from {}",
        accounts.len(),
        config.accounts_in.display(),
        transactions.len(),
        config.transactions_in.display()
    );

    let engine = PostingEngine::new(PostingConfig::new(config.processing_date));
    let outcome = engine.post(accounts, transactions);

    let mut accounts_bytes = Vec::new();
    write_records(&mut accounts_bytes, &outcome.accounts)?;
    let mut exceptions_bytes = Vec::new();
    write_records(&mut exceptions_bytes, &outcome.exceptions)?;

    write_file(&config.accounts_out, &accounts_bytes)?;
    write_file(&config.exceptions_out, &exceptions_bytes)?;

    let summary = outcome.summary;
    info!(
        "Posting for {}: {} applied, {} rejected, {} wrong date, {} unmatched, {} unknown code",
        config.processing_date,
        summary.applied,
        summary.rejected,
        summary.wrong_date,
        summary.unmatched,
        summary.unknown_code
    );
    Ok(summary)
}

/// Reads a whole record file from disk.
pub fn read_file<T: FixedRecord>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|source| PostingError::File {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(BufReader::new(file))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let with_path = |source| PostingError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(with_path)?;
    }
    fs::write(path, bytes).map_err(with_path)
}

fn check_unique_ids(accounts: &[AccountRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(accounts.len());
    for account in accounts {
        if !seen.insert(account.account_id.as_str()) {
            return Err(PostingError::DuplicateAccount(account.account_id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Timestamp;
    use crate::money::Money;
    use crate::transaction::TransactionCode;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> RunConfig {
        RunConfig {
            processing_date: CalendarDate::new(20250101),
            accounts_in: dir.path().join("data/accounts.dat"),
            transactions_in: dir.path().join("data/txns.dat"),
            accounts_out: dir.path().join("out/nested/accounts_out.dat"),
            exceptions_out: dir.path().join("out/exceptions.dat"),
        }
    }

    fn write_inputs(config: &RunConfig, accounts: &[AccountRecord], txs: &[TransactionRecord]) {
        let mut bytes = Vec::new();
        write_records(&mut bytes, accounts).unwrap();
        write_file(&config.accounts_in, &bytes).unwrap();

        let mut bytes = Vec::new();
        write_records(&mut bytes, txs).unwrap();
        write_file(&config.transactions_in, &bytes).unwrap();
    }

    #[test]
    fn test_default_paths() {
        let config = RunConfig::new(CalendarDate::new(20250101));
        assert_eq!(config.accounts_in, PathBuf::from("data/accounts.dat"));
        assert_eq!(config.exceptions_out, PathBuf::from("out/exceptions.dat"));
    }

    #[test]
    fn test_run_writes_both_outputs() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let withdrawal = TransactionRecord::new(
            "A1",
            "T2",
            TransactionCode::Withdraw,
            Money::from_minor(20000),
            Timestamp::new(20250101_100000),
        );
        write_inputs(
            &config,
            &[AccountRecord::new("A1", Money::from_minor(10000), Money::from_minor(5000))],
            &[withdrawal.clone()],
        );

        let summary = run(&config).unwrap();
        assert_eq!(summary.rejected, 1);

        let accounts: Vec<AccountRecord> = read_file(&config.accounts_out).unwrap();
        assert_eq!(accounts[0].balance, Money::from_minor(10000));
        let exceptions: Vec<TransactionRecord> = read_file(&config.exceptions_out).unwrap();
        assert_eq!(exceptions, vec![withdrawal]);
    }

    #[test]
    fn test_duplicate_account_aborts_before_writing() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let account = AccountRecord::new("A1", Money::ZERO, Money::ZERO);
        write_inputs(&config, &[account.clone(), account], &[]);

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PostingError::DuplicateAccount(ref id) if id == "A1"));
        assert!(!config.accounts_out.exists());
    }

    #[test]
    fn test_missing_input_names_the_path() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("accounts.dat"));
    }

    #[test]
    fn test_unencodable_balance_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let deposit = TransactionRecord::new(
            "A1",
            "T1",
            TransactionCode::Deposit,
            Money::from_minor(1),
            Timestamp::new(20250101_000000),
        );
        write_inputs(
            &config,
            &[AccountRecord::new("A1", Money::from_minor(9_999_999_999_999), Money::ZERO)],
            &[deposit],
        );

        let err = run(&config).unwrap_err();
        assert!(err.is_overflow());
        assert!(!config.accounts_out.exists());
        assert!(!config.exceptions_out.exists());
    }
}
