//! CSV format handling for operation journals and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain operations
//! - Account report serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{
    format_token_amount, parse_token_amount, Account, Address, OperationRecord, OperationType,
    Timestamp,
};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the journal format with columns: type, caller, account, amount,
/// value, time. Which of `account`, `amount` and `value` are required
/// depends on the operation type.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub caller: String,
    pub account: Option<String>,
    pub amount: Option<String>,
    pub value: Option<String>,
    pub time: Timestamp,
}

/// Borrow a required column, rejecting missing or blank values
fn required<'a>(field: &'a Option<String>, column: &str, op_type: &str) -> Result<&'a str, String> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{} operation requires '{}'", op_type, column)),
    }
}

fn parse_account(csv_record: &CsvRecord, op_type: &str) -> Result<Address, String> {
    let raw = required(&csv_record.account, "account", op_type)?;
    Address::from_str(raw)
}

fn parse_amount(csv_record: &CsvRecord, op_type: &str) -> Result<u128, String> {
    let raw = required(&csv_record.amount, "amount", op_type)?;
    parse_token_amount(raw)
}

fn parse_value(csv_record: &CsvRecord, op_type: &str) -> Result<u32, String> {
    let raw = required(&csv_record.value, "value", op_type)?;
    raw.parse::<u32>()
        .map_err(|_| format!("Invalid value '{}' for {}", raw, op_type))
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation type (case-insensitive)
/// - Validates the caller address
/// - Extracts and parses the columns the operation type needs
///
/// Columns an operation type does not use are ignored.
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, String> {
    let op_type = csv_record.op_type.to_lowercase();
    let caller = Address::from_str(&csv_record.caller)
        .map_err(|e| format!("Invalid caller for {}: {}", op_type, e))?;

    let kind = match op_type.as_str() {
        "transfer" => OperationType::Transfer {
            to: parse_account(&csv_record, &op_type)?,
            amount: parse_amount(&csv_record, &op_type)?,
        },
        "set_liquidity_manager" => OperationType::SetLiquidityManager {
            manager: parse_account(&csv_record, &op_type)?,
        },
        "set_trade_limit" => OperationType::SetTradeLimit {
            max_amount: parse_amount(&csv_record, &op_type)?,
            max_count: parse_value(&csv_record, &op_type)?,
        },
        "set_tax_rate" => OperationType::SetTaxRate {
            bps: parse_value(&csv_record, &op_type)?,
        },
        "exclude_from_fee" => OperationType::ExcludeFromFee {
            account: parse_account(&csv_record, &op_type)?,
        },
        "include_in_fee" => OperationType::IncludeInFee {
            account: parse_account(&csv_record, &op_type)?,
        },
        "transfer_ownership" => OperationType::TransferOwnership {
            new_owner: parse_account(&csv_record, &op_type)?,
        },
        _ => {
            return Err(format!(
                "Invalid operation type: '{}' from {}",
                csv_record.op_type, caller
            ))
        }
    };

    Ok(OperationRecord {
        caller,
        time: csv_record.time,
        kind,
    })
}

/// Write account states to CSV format
///
/// Writes accounts with columns: account, balance, fee_exempt,
/// window_start, trade_count. Accounts are sorted by address for
/// deterministic output. Accounts that never opened a trade window get an
/// empty `window_start` and a `trade_count` of 0.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "balance", "fee_exempt", "window_start", "trade_count"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.address.cmp(&b.address));

    for account in sorted_accounts {
        let (window_start, trade_count) = match account.trade_window {
            Some(window) => (window.window_start.to_string(), window.trade_count),
            None => (String::new(), 0),
        };
        writer
            .write_record(&[
                account.address.to_string(),
                format_token_amount(account.balance),
                account.fee_exempt.to_string(),
                window_start,
                trade_count.to_string(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TradeWindow, ONE_TOKEN};
    use rstest::rstest;

    fn record(
        op_type: &str,
        account: Option<&str>,
        amount: Option<&str>,
        value: Option<&str>,
    ) -> CsvRecord {
        CsvRecord {
            op_type: op_type.to_string(),
            caller: "owner".to_string(),
            account: account.map(str::to_string),
            amount: amount.map(str::to_string),
            value: value.map(str::to_string),
            time: 1_700_000_000,
        }
    }

    #[rstest]
    #[case::transfer(
        record("transfer", Some("alice"), Some("100.5"), None),
        OperationType::Transfer { to: Address::from("alice"), amount: 100 * ONE_TOKEN + ONE_TOKEN / 2 }
    )]
    #[case::case_insensitive(
        record("TRANSFER", Some("alice"), Some("1"), None),
        OperationType::Transfer { to: Address::from("alice"), amount: ONE_TOKEN }
    )]
    #[case::set_liquidity_manager(
        record("set_liquidity_manager", Some("lm"), None, None),
        OperationType::SetLiquidityManager { manager: Address::from("lm") }
    )]
    #[case::set_trade_limit(
        record("set_trade_limit", None, Some("1000000"), Some("10")),
        OperationType::SetTradeLimit { max_amount: 1_000_000 * ONE_TOKEN, max_count: 10 }
    )]
    #[case::set_tax_rate(
        record("Set_Tax_Rate", None, None, Some("250")),
        OperationType::SetTaxRate { bps: 250 }
    )]
    #[case::exclude_from_fee(
        record("exclude_from_fee", Some("alice"), None, None),
        OperationType::ExcludeFromFee { account: Address::from("alice") }
    )]
    #[case::include_in_fee(
        record("include_in_fee", Some("alice"), None, None),
        OperationType::IncludeInFee { account: Address::from("alice") }
    )]
    #[case::transfer_ownership(
        record("transfer_ownership", Some("alice"), Some("ignored"), None),
        OperationType::TransferOwnership { new_owner: Address::from("alice") }
    )]
    fn test_convert_csv_record_valid(#[case] csv_record: CsvRecord, #[case] expected: OperationType) {
        let result = convert_csv_record(csv_record).unwrap();

        assert_eq!(result.caller, Address::from("owner"));
        assert_eq!(result.time, 1_700_000_000);
        assert_eq!(result.kind, expected);
    }

    #[rstest]
    #[case::invalid_type(record("mint", Some("alice"), Some("1"), None), "Invalid operation type")]
    #[case::transfer_missing_account(record("transfer", None, Some("1"), None), "requires 'account'")]
    #[case::transfer_missing_amount(record("transfer", Some("alice"), None, None), "requires 'amount'")]
    #[case::transfer_blank_amount(record("transfer", Some("alice"), Some("  "), None), "requires 'amount'")]
    #[case::transfer_negative(record("transfer", Some("alice"), Some("-5"), None), "must not be negative")]
    #[case::transfer_malformed(record("transfer", Some("alice"), Some("abc"), None), "Invalid token amount")]
    #[case::trade_limit_missing_count(record("set_trade_limit", None, Some("5"), None), "requires 'value'")]
    #[case::tax_rate_not_a_number(record("set_tax_rate", None, None, Some("5%")), "Invalid value")]
    #[case::tax_rate_negative(record("set_tax_rate", None, None, Some("-1")), "Invalid value")]
    fn test_convert_csv_record_errors(#[case] csv_record: CsvRecord, #[case] expected_error: &str) {
        let error = convert_csv_record(csv_record).unwrap_err();
        assert!(error.contains(expected_error), "unexpected error: {}", error);
    }

    #[test]
    fn test_convert_csv_record_rejects_blank_caller() {
        let mut csv_record = record("transfer", Some("alice"), Some("1"), None);
        csv_record.caller = "   ".to_string();

        let error = convert_csv_record(csv_record).unwrap_err();
        assert!(error.contains("Invalid caller"));
    }

    fn account(name: &str, balance: u128, fee_exempt: bool, window: Option<TradeWindow>) -> Account {
        let mut account = Account::new(Address::from(name));
        account.balance = balance;
        account.fee_exempt = fee_exempt;
        account.trade_window = window;
        account
    }

    #[rstest]
    #[case::single_account(
        vec![account("alice", 100 * ONE_TOKEN, false, None)],
        "account,balance,fee_exempt,window_start,trade_count\nalice,100,false,,0\n"
    )]
    #[case::with_window(
        vec![account(
            "alice",
            ONE_TOKEN / 20,
            false,
            Some(TradeWindow { window_start: 1_700_000_000, trade_count: 3 }),
        )],
        "account,balance,fee_exempt,window_start,trade_count\nalice,0.05,false,1700000000,3\n"
    )]
    #[case::sorted_by_address(
        vec![
            account("carol", 0, false, None),
            account("alice", 0, true, None),
            account("bob", 0, false, None),
        ],
        "account,balance,fee_exempt,window_start,trade_count\nalice,0,true,,0\nbob,0,false,,0\ncarol,0,false,,0\n"
    )]
    #[case::empty_accounts(vec![], "account,balance,fee_exempt,window_start,trade_count\n")]
    fn test_write_accounts_csv(#[case] accounts: Vec<Account>, #[case] expected_output: &str) {
        let mut output = Vec::new();
        write_accounts_csv(&accounts, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }
}
