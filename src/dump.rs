//! CSV rendering of decoded record files, for eyeballing and diffing.
//!
//! Amounts appear twice: as raw minor units and as two-place decimals.

use crate::account::AccountRecord;
use crate::date::{CalendarDate, Timestamp};
use crate::error::Result;
use crate::money::Money;
use crate::transaction::TransactionRecord;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

pub const ACCOUNT_HEADERS: [&str; 10] = [
    "ACCT_ID",
    "CUST_ID",
    "PRODUCT",
    "STATUS",
    "CURR_BAL_CENTS",
    "CURR_BAL",
    "OD_LIMIT_CENTS",
    "OD_LIMIT",
    "OPEN_DATE",
    "CLOSE_DATE",
];

pub const TRANSACTION_HEADERS: [&str; 8] = [
    "ACCT_ID",
    "TXN_ID",
    "ORIG_ID",
    "CODE",
    "AMOUNT_CENTS",
    "AMOUNT",
    "TS",
    "CHANNEL",
];

#[derive(Serialize)]
struct AccountRow<'a> {
    acct_id: &'a str,
    cust_id: &'a str,
    product: &'a str,
    status: &'a str,
    curr_bal_cents: i64,
    curr_bal: Money,
    od_limit_cents: i64,
    od_limit: Money,
    open_date: CalendarDate,
    close_date: CalendarDate,
}

impl<'a> From<&'a AccountRecord> for AccountRow<'a> {
    fn from(a: &'a AccountRecord) -> Self {
        AccountRow {
            acct_id: &a.account_id,
            cust_id: &a.customer_id,
            product: &a.product_code,
            status: &a.status,
            curr_bal_cents: a.balance.minor(),
            curr_bal: a.balance,
            od_limit_cents: a.overdraft_limit.minor(),
            od_limit: a.overdraft_limit,
            open_date: a.open_date,
            close_date: a.close_date,
        }
    }
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    acct_id: &'a str,
    txn_id: &'a str,
    orig_id: &'a str,
    code: &'a str,
    amount_cents: i64,
    amount: Money,
    ts: Timestamp,
    channel: &'a str,
}

impl<'a> From<&'a TransactionRecord> for TransactionRow<'a> {
    fn from(t: &'a TransactionRecord) -> Self {
        TransactionRow {
            acct_id: &t.account_id,
            txn_id: &t.transaction_id,
            orig_id: &t.original_id,
            code: t.code.as_str(),
            amount_cents: t.amount.minor(),
            amount: t.amount,
            ts: t.timestamp,
            channel: &t.channel,
        }
    }
}

/// Writes accounts as CSV, header first even when there are no rows.
pub fn write_accounts_csv<W: Write>(writer: W, accounts: &[AccountRecord]) -> Result<()> {
    write_rows(writer, &ACCOUNT_HEADERS, accounts.iter().map(AccountRow::from))
}

/// Writes transactions as CSV, header first even when there are no rows.
pub fn write_transactions_csv<W: Write>(
    writer: W,
    transactions: &[TransactionRecord],
) -> Result<()> {
    write_rows(
        writer,
        &TRANSACTION_HEADERS,
        transactions.iter().map(TransactionRow::from),
    )
}

fn write_rows<W, S, I>(writer: W, headers: &[&str], rows: I) -> Result<()>
where
    W: Write,
    S: Serialize,
    I: IntoIterator<Item = S>,
{
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionCode;
    use std::str::FromStr;

    fn render_accounts(accounts: &[AccountRecord]) -> String {
        let mut out = Vec::new();
        write_accounts_csv(&mut out, accounts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_account_rows() {
        let mut account = AccountRecord::new(
            "A1",
            Money::from_str("-70.05").unwrap(),
            Money::from_str("50").unwrap(),
        );
        account.status = "A".to_string();
        account.open_date = CalendarDate::new(20200101);

        let output = render_accounts(&[account]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines[0],
            "ACCT_ID,CUST_ID,PRODUCT,STATUS,CURR_BAL_CENTS,CURR_BAL,OD_LIMIT_CENTS,OD_LIMIT,OPEN_DATE,CLOSE_DATE"
        );
        assert_eq!(lines[1], "A1,,,A,-7005,-70.05,5000,50.00,20200101,00000000");
    }

    #[test]
    fn test_header_only_when_empty() {
        let output = render_accounts(&[]);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_transaction_rows() {
        let mut tx = TransactionRecord::new(
            "A1",
            "T1",
            TransactionCode::Interest,
            Money::from_minor(5),
            Timestamp::new(20250101_120000),
        );
        tx.channel = "WEB".to_string();

        let mut out = Vec::new();
        write_transactions_csv(&mut out, &[tx]).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("ACCT_ID,TXN_ID,ORIG_ID,CODE,AMOUNT_CENTS,AMOUNT,TS,CHANNEL\n"));
        assert!(output.contains("A1,T1,,INT,5,0.05,20250101120000,WEB\n"));
    }
}
