//! Delimited-text format handling for the user and account stores
//!
//! This module centralizes all format concerns, providing:
//! - Record structures for deserialization, looked up by column name
//! - The `|||` to `|` delimiter fold applied to the accounts source
//! - Conversion from records to domain types
//! - Account output serialization in the original `|||` format
//!
//! All functions are pure (no file access) for easy testing.
//!
//! # Format limitation
//!
//! The accounts file separates fields with the three-character sequence `|||`.
//! Every occurrence is folded to a single `|` before parsing, so a literal `|`
//! inside a field is read as a separator and cannot survive a round-trip.
//! Existing data files depend on this layout, so it is kept as is.

use crate::types::{format_amount, Account, AccountKind, BankError, User};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// Field separator used by the accounts file
pub const ACCOUNT_DELIMITER: &str = "|||";

/// Header line of the accounts file
pub const ACCOUNT_HEADER: &str = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance";

/// User information row
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserRecord {
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "AccountOwnerID")]
    pub owner_id: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User::new(
            record.owner_id,
            record.first_name,
            record.surname,
            record.mobile,
        )
    }
}

/// Account row, after the delimiter fold
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountRecord {
    #[serde(rename = "AccountOwnerID")]
    pub owner_id: String,
    #[serde(rename = "AccountNumber")]
    pub number: String,
    #[serde(rename = "AccountType")]
    pub account_type: String,
    #[serde(rename = "OpeningBalance")]
    pub opening_balance: String,
}

/// Replace every `|||` with `|`, one line at a time
///
/// Line terminators are kept so the csv reader still sees the original rows.
pub fn fold_delimiter(raw: &str) -> String {
    raw.split_inclusive('\n')
        .map(|line| line.replace(ACCOUNT_DELIMITER, "|"))
        .collect()
}

/// Parse a decimal amount as typed by an operator or stored in a file
///
/// Surrounding whitespace is ignored and scientific notation is accepted.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Convert an AccountRecord to an Account
///
/// The type tag is checked before the balance: a row with an unknown tag is
/// reported as `UnknownAccountType` even when its balance is not a number.
///
/// # Arguments
///
/// * `record` - The deserialized account row
/// * `line` - Line number of the row, used in error messages
///
/// # Returns
///
/// * `Ok(Account)` - Successfully converted record
/// * `Err(BankError::UnknownAccountType)` - The row should be skipped
/// * `Err(BankError::MalformedRecord)` - The opening balance is not a decimal
pub fn convert_account_record(record: AccountRecord, line: u64) -> Result<Account, BankError> {
    let kind = AccountKind::from_tag(&record.account_type)
        .ok_or_else(|| BankError::unknown_account_type(&record.account_type, line))?;

    let balance = parse_amount(&record.opening_balance).ok_or_else(|| {
        BankError::malformed_record(
            Some(line),
            format!(
                "Invalid opening balance '{}' for account {}",
                record.opening_balance, record.number
            ),
        )
    })?;

    Ok(Account::new(record.owner_id, record.number, kind, balance))
}

/// Parse the user information source
///
/// Comma-separated with a header row. Columns are looked up by name, and both
/// headers and fields are trimmed.
///
/// # Errors
///
/// Returns `MalformedRecord` for the first row that cannot be deserialized.
pub fn parse_users<R: Read>(source: R) -> Result<Vec<User>, BankError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    reader
        .deserialize::<UserRecord>()
        .map(|result| result.map(User::from).map_err(BankError::from))
        .collect()
}

/// Parse the accounts source
///
/// Folds `|||` to `|` and parses the result with `|` as the delimiter. Rows
/// are returned in source order. Rows with an unknown type tag are skipped
/// with a warning.
///
/// # Errors
///
/// Returns `MalformedRecord` for the first row with the wrong number of fields
/// or an opening balance that is not a decimal. No partial result is returned.
pub fn parse_accounts(raw: &str) -> Result<Vec<Account>, BankError> {
    let folded = fold_delimiter(raw);
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .trim(Trim::None)
        .from_reader(folded.as_bytes());

    let headers = reader.headers()?.clone();
    let mut row = StringRecord::new();
    let mut accounts = Vec::new();

    while reader.read_record(&mut row)? {
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let record: AccountRecord = row.deserialize(Some(&headers))?;

        match convert_account_record(record, line) {
            Ok(account) => accounts.push(account),
            Err(e @ BankError::UnknownAccountType { .. }) => {
                tracing::warn!("Skipping account row: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(accounts)
}

/// Write accounts in the original `|||` format
///
/// Writes the header, then one line per account in the given order with
/// values owner, number, type tag and balance rounded to two decimal places.
/// Each row is preceded by a newline, so the output has no trailing newline.
///
/// # Arguments
///
/// * `accounts` - Accounts in the order they should be persisted
/// * `output` - Destination writer
pub fn write_accounts(accounts: &[Account], output: &mut dyn Write) -> std::io::Result<()> {
    output.write_all(ACCOUNT_HEADER.as_bytes())?;

    for account in accounts {
        write!(
            output,
            "\n{}{sep}{}{sep}{}{sep}{}",
            account.owner,
            account.number,
            account.kind.type_tag(),
            format_amount(account.balance.round_dp(2)),
            sep = ACCOUNT_DELIMITER,
        )?;
    }

    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const USERS: &str = "FirstName,Surname,Mobile,AccountOwnerID\n\
        Ada,Lovelace,0400111222,A1\n\
        Alan,Turing,0400333444,A2\n";

    const ACCOUNTS: &str = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
        A1|||001|||Cheque|||100.00\n\
        A1|||002|||Saving|||50.00\n\
        A2|||003|||Cheque|||12.5";

    #[rstest]
    #[case::single_line("a|||b|||c", "a|b|c")]
    #[case::keeps_newlines("a|||b\nc|||d\n", "a|b\nc|d\n")]
    #[case::keeps_crlf("a|||b\r\nc|||d", "a|b\r\nc|d")]
    #[case::single_pipe_untouched("a|b", "a|b")]
    #[case::four_pipes("a||||b", "a||b")]
    #[case::six_pipes("a||||||b", "a||b")]
    #[case::empty("", "")]
    fn test_fold_delimiter(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(fold_delimiter(raw), expected);
    }

    #[rstest]
    #[case("100.00", Some(Decimal::new(10000, 2)))]
    #[case("  25 ", Some(Decimal::new(25, 0)))]
    #[case("-5.5", Some(Decimal::new(-55, 1)))]
    #[case("1e2", Some(Decimal::new(100, 0)))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("   ", None)]
    fn test_parse_amount(#[case] text: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_amount(text), expected);
    }

    #[test]
    fn test_parse_users_by_column_name() {
        let users = parse_users(USERS.as_bytes()).unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0], User::new("A1", "Ada", "Lovelace", "0400111222"));
        assert_eq!(users[1].id, "A2");
    }

    #[test]
    fn test_parse_users_column_order_does_not_matter() {
        let source = "AccountOwnerID, Mobile, Surname, FirstName\nA9, 0400, Hopper, Grace\n";
        let users = parse_users(source.as_bytes()).unwrap();

        assert_eq!(users, vec![User::new("A9", "Grace", "Hopper", "0400")]);
    }

    #[test]
    fn test_parse_users_missing_column_fails() {
        let source = "FirstName,Surname,Mobile\nAda,Lovelace,0400\n";
        let result = parse_users(source.as_bytes());

        assert!(matches!(result, Err(BankError::MalformedRecord { .. })));
    }

    #[test]
    fn test_parse_accounts_preserves_order_and_kinds() {
        let accounts = parse_accounts(ACCOUNTS).unwrap();

        assert_eq!(accounts.len(), 3);
        assert_eq!(
            accounts[0],
            Account::new("A1", "001", AccountKind::Checking, Decimal::new(10000, 2))
        );
        assert_eq!(accounts[1].kind, AccountKind::Savings);
        assert_eq!(accounts[2].number, "003");
        assert_eq!(accounts[2].balance, Decimal::new(125, 1));
    }

    #[test]
    fn test_parse_accounts_skips_unknown_type() {
        let raw = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
            A1|||001|||Cheque|||10\n\
            A1|||002|||Credit|||20\n\
            A1|||003|||Saving|||30\n";
        let accounts = parse_accounts(raw).unwrap();

        let numbers: Vec<_> = accounts.iter().map(|a| a.number.as_str()).collect();
        assert_eq!(numbers, vec!["001", "003"]);
    }

    #[test]
    fn test_parse_accounts_unknown_type_checked_before_balance() {
        let raw = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
            A1|||002|||Credit|||not-a-number\n";

        assert!(parse_accounts(raw).unwrap().is_empty());
    }

    #[test]
    fn test_parse_accounts_malformed_balance_reports_line() {
        let raw = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
            A1|||001|||Cheque|||10\n\
            A1|||002|||Saving|||ten\n";
        let result = parse_accounts(raw);

        match result {
            Err(BankError::MalformedRecord { line, message }) => {
                assert_eq!(line, Some(3));
                assert!(message.contains("ten"));
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_accounts_wrong_field_count_fails() {
        let raw = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
            A1|||001|||Cheque\n";

        assert!(matches!(
            parse_accounts(raw),
            Err(BankError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse_accounts_literal_pipe_is_read_as_separator() {
        let raw = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
            A1|||00|1|||Cheque|||10\n";

        assert!(matches!(
            parse_accounts(raw),
            Err(BankError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse_accounts_header_only() {
        assert!(parse_accounts(ACCOUNT_HEADER).unwrap().is_empty());
    }

    #[rstest]
    #[case::rounds_to_two_places(Decimal::new(1234567, 5), "12.35")]
    #[case::midpoint_to_even(Decimal::new(1125, 3), "1.12")]
    #[case::whole_number(Decimal::new(12500, 2), "125.0")]
    #[case::one_place(Decimal::new(505, 1), "50.5")]
    #[case::negative(Decimal::new(-1000, 2), "-10.0")]
    fn test_write_accounts_balance_rounding(#[case] balance: Decimal, #[case] expected: &str) {
        let accounts = vec![Account::new("A1", "001", AccountKind::Checking, balance)];
        let mut output = Vec::new();
        write_accounts(&accounts, &mut output).unwrap();

        let expected_output = format!("{}\nA1|||001|||Cheque|||{}", ACCOUNT_HEADER, expected);
        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }

    #[test]
    fn test_write_accounts_empty_is_header_only() {
        let mut output = Vec::new();
        write_accounts(&[], &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), ACCOUNT_HEADER);
    }

    #[test]
    fn test_round_trip_reproduces_source() {
        let source = "AccountOwnerID|||AccountNumber|||AccountType|||OpeningBalance\n\
            A1|||001|||Cheque|||100.0\n\
            A1|||002|||Saving|||50.25\n\
            B7|||001|||Saving|||-3.5";
        let accounts = parse_accounts(source).unwrap();

        let mut output = Vec::new();
        write_accounts(&accounts, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), source);
    }
}
