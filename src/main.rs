//! Daily Post CLI
//!
//! # Usage
//!
//! ```bash
//! daily-post post --date 20250101 --accounts data/accounts.dat --transactions data/txns.dat
//! daily-post dump accounts out/accounts_out.dat > accounts.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info`, `debug` or `warn` to control logging verbosity

use clap::{Parser, Subcommand, ValueEnum};
use daily_post::runner::{
    self, DEFAULT_ACCOUNTS_IN, DEFAULT_ACCOUNTS_OUT, DEFAULT_EXCEPTIONS_OUT,
    DEFAULT_TRANSACTIONS_IN,
};
use daily_post::{dump, AccountRecord, CalendarDate, Result, RunConfig, TransactionRecord};
use std::io;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "daily-post", version)]
#[command(about = "Post a day of fixed-width transactions against packed-decimal accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply one processing date's transactions and write accounts and exceptions
    Post {
        /// Processing date; only transactions stamped with this date are applied
        #[arg(long, value_name = "YYYYMMDD", value_parser = parse_date)]
        date: CalendarDate,

        /// Input account file (58-byte records)
        #[arg(long, value_name = "PATH", default_value = DEFAULT_ACCOUNTS_IN)]
        accounts: PathBuf,

        /// Input transaction file (72-byte records)
        #[arg(long, value_name = "PATH", default_value = DEFAULT_TRANSACTIONS_IN)]
        transactions: PathBuf,

        /// Updated account file to write
        #[arg(long = "accounts-out", value_name = "PATH", default_value = DEFAULT_ACCOUNTS_OUT)]
        accounts_out: PathBuf,

        /// Exception file to write (rejected transactions)
        #[arg(long = "exceptions-out", value_name = "PATH", default_value = DEFAULT_EXCEPTIONS_OUT)]
        exceptions_out: PathBuf,
    },

    /// Decode a record file and print it as CSV
    Dump {
        /// Record layout of the file
        #[arg(value_enum)]
        kind: RecordKind,

        /// Record file to decode
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RecordKind {
    Accounts,
    Transactions,
}

fn parse_date(s: &str) -> std::result::Result<CalendarDate, String> {
    CalendarDate::from_str(s).map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Post {
            date,
            accounts,
            transactions,
            accounts_out,
            exceptions_out,
        } => {
            let config = RunConfig {
                processing_date: date,
                accounts_in: accounts,
                transactions_in: transactions,
                accounts_out,
                exceptions_out,
            };
            let summary = runner::run(&config)?;
            println!(
                "Posted {} of {} transactions for {}; {} exceptions written to {}",
                summary.applied,
                summary.transactions,
                date,
                summary.rejected,
                config.exceptions_out.display()
            );
        }
        Command::Dump { kind, path } => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            match kind {
                RecordKind::Accounts => {
                    let records: Vec<AccountRecord> = runner::read_file(&path)?;
                    dump::write_accounts_csv(handle, &records)?;
                }
                RecordKind::Transactions => {
                    let records: Vec<TransactionRecord> = runner::read_file(&path)?;
                    dump::write_transactions_csv(handle, &records)?;
                }
            }
        }
    }

    Ok(())
}
