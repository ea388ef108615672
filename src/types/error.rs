//! Error types for the ATM terminal
//!
//! This module defines every error that can occur while loading the stores,
//! running a session, or saving the accounts back to disk.
//!
//! # Error Categories
//!
//! - **Load Errors**: File not found, malformed rows, unknown account types
//! - **Session Errors**: Invalid user ID, menu option, account choice or amount,
//!   insufficient funds. These are printed to the operator and the session continues.
//! - **Save Errors**: Failure while overwriting the accounts file
//! - **Terminal Errors**: Input closed or the terminal could not be written

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the terminal
///
/// The `Display` text of the session variants is exactly what the operator
/// sees on the terminal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Store file not found at the specified path
    ///
    /// Fatal: no session is started.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading a store file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A row could not be parsed
    ///
    /// Fatal to the load: the session must not start on malformed data.
    #[error("Malformed record{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedRecord {
        /// Line number of the offending row (if available)
        line: Option<u64>,
        /// Description of the parse failure
        message: String,
    },

    /// Account row with a type tag that is neither `Cheque` nor `Saving`
    ///
    /// Non-fatal: the row is dropped and loading continues.
    #[error("Unknown account type '{tag}' at line {line}")]
    UnknownAccountType {
        /// The unrecognised type tag
        tag: String,
        /// Line number of the skipped row
        line: u64,
    },

    #[error("Wrong input. Invalid user ID")]
    InvalidUserId,

    #[error("Wrong input. Invalid transaction option")]
    InvalidMenuChoice,

    #[error("Wrong input. Invalid account choice")]
    InvalidAccountSelection,

    /// Amount text is not a decimal number
    #[error("Wrong input. Invalid amount '{input}'")]
    InvalidAmount {
        /// The raw text the operator entered
        input: String,
    },

    /// Withdrawal larger than the current balance
    ///
    /// The balance is left unchanged.
    #[error(
        "Error: Wrong input. Amount entered (${}) is greater than amount in account",
        crate::types::format_amount(*requested)
    )]
    InsufficientFunds {
        /// Balance at the time of the request
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Balance arithmetic would overflow the decimal range
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: String,
    },

    /// Overwriting the accounts file failed
    ///
    /// Fatal. The file is rewritten in place, so it may be left truncated.
    #[error("Failed to write accounts to {path}: {message}")]
    PersistenceWriteFailure {
        /// Destination path
        path: String,
        /// Description of the failure
        message: String,
    },

    /// The operator input ended before the quit option was chosen
    #[error("Input closed before the session was terminated")]
    InputClosed,

    /// The terminal could not be read or written
    #[error("Terminal error: {message}")]
    Terminal {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Create a MalformedRecord error
    pub fn malformed_record(line: Option<u64>, message: impl Into<String>) -> Self {
        BankError::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create an UnknownAccountType error
    pub fn unknown_account_type(tag: &str, line: u64) -> Self {
        BankError::UnknownAccountType {
            tag: tag.to_string(),
            line,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        BankError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a PersistenceWriteFailure error
    pub fn persistence_write_failure(path: &str, message: impl Into<String>) -> Self {
        BankError::PersistenceWriteFailure {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Whether the session can continue after this error
    ///
    /// Recoverable errors are printed to the operator and control returns to
    /// the nearest enclosing state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BankError::InvalidUserId
                | BankError::InvalidMenuChoice
                | BankError::InvalidAccountSelection
                | BankError::InvalidAmount { .. }
                | BankError::InsufficientFunds { .. }
                | BankError::ArithmeticOverflow { .. }
        )
    }
}
