//! Account-related types for the ATM terminal
//!
//! This module defines the Account structure and the closed set of account
//! kinds it can take.

use rust_decimal::Decimal;
use std::fmt;

/// Account variants
///
/// Each variant supplies its canonical persisted type tag and its display label
/// independently, so display text can change without touching stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Persisted as `Cheque`
    Checking,
    /// Persisted as `Saving`
    Savings,
}

impl AccountKind {
    /// Resolve a persisted type tag
    ///
    /// Returns `None` for any tag other than `Cheque` or `Saving`. Matching is
    /// exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Cheque" => Some(AccountKind::Checking),
            "Saving" => Some(AccountKind::Savings),
            _ => None,
        }
    }

    /// Canonical type tag written to the accounts file
    pub fn type_tag(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Cheque",
            AccountKind::Savings => "Saving",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
        }
    }
}

/// A single bank account
///
/// Only `balance` changes after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Identifier of the owning user; may reference a user that does not exist
    pub owner: String,

    /// Account number, an opaque string
    pub number: String,

    pub kind: AccountKind,

    /// Current balance
    ///
    /// Carries full precision during a session and is rounded to two
    /// decimal places only when written back to the accounts file.
    pub balance: Decimal,
}

impl Account {
    pub fn new(
        owner: impl Into<String>,
        number: impl Into<String>,
        kind: AccountKind,
        balance: Decimal,
    ) -> Self {
        Account {
            owner: owner.into(),
            number: number.into(),
            kind,
            balance,
        }
    }

    /// Whether this account belongs to the given user identifier
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} account {}", self.kind.label(), self.number)
    }
}
