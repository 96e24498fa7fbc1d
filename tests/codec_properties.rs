//! Property tests: any representable record survives encode then decode.

use daily_post::{
    AccountRecord, CalendarDate, Money, Timestamp, TransactionCode, TransactionRecord,
    ACCOUNT_RECORD_LEN, TRANSACTION_RECORD_LEN,
};
use proptest::prelude::*;

fn text(width: usize) -> impl Strategy<Value = String> {
    // No trailing space: trailing padding is not part of the value.
    proptest::string::string_regex(&format!("([A-Z0-9 ]{{0,{}}}[A-Z0-9])?", width - 1)).unwrap()
}

fn money(digits: u32) -> impl Strategy<Value = Money> {
    let capacity = 10i64.pow(digits) - 1;
    (-capacity..=capacity).prop_map(Money::from_minor)
}

fn code() -> impl Strategy<Value = TransactionCode> {
    prop_oneof![
        Just(TransactionCode::Deposit),
        Just(TransactionCode::Withdraw),
        Just(TransactionCode::Fee),
        Just(TransactionCode::Interest),
        Just(TransactionCode::Reversal),
        "[A-Z]{4}".prop_map(|c| TransactionCode::parse(&c)),
    ]
}

prop_compose! {
    fn account()(
        account_id in text(12),
        customer_id in text(12),
        product_code in text(4),
        status in text(1),
        balance in money(13),
        overdraft_limit in money(11),
        open_date in 0u32..=CalendarDate::MAX,
        close_date in 0u32..=CalendarDate::MAX,
    ) -> AccountRecord {
        AccountRecord {
            account_id,
            customer_id,
            product_code,
            status,
            balance,
            overdraft_limit,
            open_date: CalendarDate::new(open_date),
            close_date: CalendarDate::new(close_date),
        }
    }
}

prop_compose! {
    fn transaction()(
        account_id in text(12),
        transaction_id in text(16),
        original_id in text(16),
        code in code(),
        amount in money(11),
        timestamp in 0u64..=Timestamp::MAX,
        channel in text(4),
    ) -> TransactionRecord {
        TransactionRecord {
            account_id,
            transaction_id,
            original_id,
            code,
            amount,
            timestamp: Timestamp::new(timestamp),
            channel,
        }
    }
}

proptest! {
    #[test]
    fn account_round_trip(record in account()) {
        let bytes = record.encode().unwrap();
        prop_assert_eq!(bytes.len(), ACCOUNT_RECORD_LEN);
        prop_assert_eq!(AccountRecord::decode(&bytes).unwrap(), record);
    }

    #[test]
    fn transaction_round_trip(record in transaction()) {
        let bytes = record.encode().unwrap();
        prop_assert_eq!(bytes.len(), TRANSACTION_RECORD_LEN);
        prop_assert_eq!(TransactionRecord::decode(&bytes).unwrap(), record);
    }

    #[test]
    fn decoded_bytes_re_encode_identically(record in account()) {
        let bytes = record.encode().unwrap();
        let again = AccountRecord::decode(&bytes).unwrap().encode().unwrap();
        prop_assert_eq!(&again[..], &bytes[..]);
    }
}
