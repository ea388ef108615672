//! Account management module
//!
//! This module provides the `AccountManager` struct which owns every loaded
//! account for the lifetime of a session.
//!
//! The AccountManager is responsible for:
//! - Keeping accounts in their original load order
//! - Filtering the accounts that belong to one user
//! - Applying deposits and withdrawals to a single account

use crate::types::{Account, BankError};
use rust_decimal::Decimal;

/// Position of an account in load order
pub type AccountIndex = usize;

/// Owns all accounts and their balances
///
/// Accounts are never added or removed after construction. Callers refer to
/// an account by its index in load order.
#[derive(Debug, Clone, Default)]
pub struct AccountManager {
    accounts: Vec<Account>,
}

impl AccountManager {
    /// Create a manager over accounts in load order
    pub fn new(accounts: Vec<Account>) -> Self {
        AccountManager { accounts }
    }

    /// All accounts, in load order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, index: AccountIndex) -> Option<&Account> {
        self.accounts.get(index)
    }

    /// Indices of the accounts owned by `user_id`
    ///
    /// Linear scan; the result keeps load order.
    pub fn indices_for_owner(&self, user_id: &str) -> Vec<AccountIndex> {
        self.accounts
            .iter()
            .enumerate()
            .filter(|(_, account)| account.is_owned_by(user_id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Current balance of an account
    pub fn balance(&self, index: AccountIndex) -> Option<Decimal> {
        self.get(index).map(|account| account.balance)
    }

    /// Deposit funds into an account
    ///
    /// The amount is added unconditionally, including negative amounts.
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the new balance cannot be represented;
    /// the balance is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Indices come from
    /// [`indices_for_owner`](Self::indices_for_owner).
    pub fn deposit(&mut self, index: AccountIndex, amount: Decimal) -> Result<Decimal, BankError> {
        let account = &mut self.accounts[index];

        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", &account.number))?;

        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Withdraw funds from an account
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` when `amount` is greater than the current
    /// balance. The balance is left unchanged on any error.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn withdraw(&mut self, index: AccountIndex, amount: Decimal) -> Result<Decimal, BankError> {
        let account = &mut self.accounts[index];

        if amount > account.balance {
            return Err(BankError::insufficient_funds(account.balance, amount));
        }

        let new_balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", &account.number))?;

        account.balance = new_balance;
        Ok(new_balance)
    }
}
