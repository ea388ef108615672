//! Interactive session engine
//!
//! This module provides the `Session` state machine that drives one operator
//! session from authentication to quit.
//!
//! # States
//!
//! ```text
//! AwaitingUserId ──match──▶ AwaitingMenuChoice ──"1"──▶ Depositing     ─┐
//!       ▲   │                  │   ▲            ──"2"──▶ Withdrawing    ─┤
//!       └───┘ no match         │   └─────────── ──"3"──▶ ViewingBalance ─┘
//!                              └──"q"──▶ Terminated
//! ```
//!
//! Quitting is only recognised at the menu. Entering `q` as a user ID is an
//! ordinary failed lookup.
//!
//! Recoverable errors (see [`BankError::is_recoverable`]) are printed to the
//! terminal and control returns to the nearest enclosing state: the user ID
//! prompt before authentication, the menu afterwards.

use crate::core::account_manager::{AccountIndex, AccountManager};
use crate::core::traits::{AccountSink, Terminal};
use crate::io::csv_format::parse_amount;
use crate::types::{format_amount, Account, BankError, User};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingUserId,
    AwaitingMenuChoice,
    Depositing,
    Withdrawing,
    ViewingBalance,
    Terminated,
}

/// Menu options offered after authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Deposit,
    Withdraw,
    Balance,
    Quit,
}

impl MenuChoice {
    /// Parse a menu token; matching is exact
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(MenuChoice::Deposit),
            "2" => Some(MenuChoice::Withdraw),
            "3" => Some(MenuChoice::Balance),
            "q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }

    fn next_state(self) -> SessionState {
        match self {
            MenuChoice::Deposit => SessionState::Depositing,
            MenuChoice::Withdraw => SessionState::Withdrawing,
            MenuChoice::Balance => SessionState::ViewingBalance,
            MenuChoice::Quit => SessionState::Terminated,
        }
    }
}

/// One operator session over the loaded stores
///
/// Owns the users, the accounts and the terminal for its whole lifetime.
/// Accounts are handed to the [`AccountSink`] once, when the session reaches
/// [`SessionState::Terminated`].
pub struct Session<T: Terminal> {
    users: Vec<User>,
    accounts: AccountManager,
    terminal: T,
    state: SessionState,
    /// Index into `users` of the last authenticated user
    current_user: Option<usize>,
    /// The authenticated user's accounts, in load order
    user_accounts: Vec<AccountIndex>,
    transacting: Option<AccountIndex>,
}

impl<T: Terminal> Session<T> {
    pub fn new(users: Vec<User>, accounts: Vec<Account>, terminal: T) -> Self {
        Session {
            users,
            accounts: AccountManager::new(accounts),
            terminal,
            state: SessionState::AwaitingUserId,
            current_user: None,
            user_accounts: Vec::new(),
            transacting: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// All accounts in load order, with their current balances
    pub fn accounts(&self) -> &[Account] {
        self.accounts.accounts()
    }

    /// The last authenticated user
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.and_then(|index| self.users.get(index))
    }

    /// The account selected in the most recent transaction sub-flow
    pub fn transacting_account(&self) -> Option<&Account> {
        self.transacting.and_then(|index| self.accounts.get(index))
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Run the session until the operator quits
    ///
    /// On quit, prints the last authenticated user's accounts and saves every
    /// account through `sink`.
    ///
    /// # Errors
    ///
    /// * `InputClosed` - input ended before quit; nothing is saved
    /// * `Terminal` - the terminal could not be read or written
    /// * `PersistenceWriteFailure` - the save failed
    pub fn run(&mut self, sink: &mut dyn AccountSink) -> Result<(), BankError> {
        while self.state != SessionState::Terminated {
            self.step(sink)?;
        }
        Ok(())
    }

    /// Perform a single state transition
    ///
    /// Returns the new state. Calling `step` once terminated is a no-op.
    pub fn step(&mut self, sink: &mut dyn AccountSink) -> Result<SessionState, BankError> {
        let result = match self.state {
            SessionState::AwaitingUserId => self.authenticate(),
            SessionState::AwaitingMenuChoice => self.choose_option(),
            SessionState::Depositing => self.deposit(),
            SessionState::Withdrawing => self.withdraw(),
            SessionState::ViewingBalance => self.view_balance(),
            SessionState::Terminated => return Ok(SessionState::Terminated),
        };

        let next = match result {
            Ok(next) => next,
            Err(e) if e.is_recoverable() => {
                tracing::debug!(state = ?self.state, "Recoverable error: {}", e);
                self.terminal.print_line(&e.to_string())?;
                self.recovery_state()
            }
            Err(e) => return Err(e),
        };

        if next == SessionState::Terminated {
            self.terminate(sink)?;
        }

        self.state = next;
        Ok(next)
    }

    fn recovery_state(&self) -> SessionState {
        match self.state {
            SessionState::AwaitingUserId => SessionState::AwaitingUserId,
            _ => SessionState::AwaitingMenuChoice,
        }
    }

    fn read_input(&mut self) -> Result<String, BankError> {
        self.terminal.read_line()?.ok_or(BankError::InputClosed)
    }

    fn authenticate(&mut self) -> Result<SessionState, BankError> {
        self.terminal.print_line("Please enter your User ID:")?;
        let user_id = self.read_input()?;

        let index = self
            .users
            .iter()
            .position(|user| user.id == user_id)
            .ok_or(BankError::InvalidUserId)?;

        self.current_user = Some(index);
        self.user_accounts = self.accounts.indices_for_owner(&user_id);
        tracing::debug!(
            user = %user_id,
            accounts = self.user_accounts.len(),
            "User authenticated"
        );

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn choose_option(&mut self) -> Result<SessionState, BankError> {
        let name = self
            .current_user()
            .map(|user| user.to_string())
            .unwrap_or_default();
        self.terminal.print_line(&format!(
            "Welcome {}. Please enter an Option\n    \
             1 For Deposit\n    \
             2 For Withdraw\n    \
             3 For Balance\n    \
             q To Quit",
            name
        ))?;

        let token = self.read_input()?;
        MenuChoice::from_token(&token)
            .map(MenuChoice::next_state)
            .ok_or(BankError::InvalidMenuChoice)
    }

    /// Present the user's accounts and read a 1-based choice
    ///
    /// The transacting account is cleared first and only set on a valid choice.
    fn select_account(&mut self, prompt: &str) -> Result<AccountIndex, BankError> {
        self.transacting = None;

        let mut menu = prompt.to_string();
        for (position, &index) in self.user_accounts.iter().enumerate() {
            if let Some(account) = self.accounts.get(index) {
                menu.push_str(&format!("\n\t {} for {}", position + 1, account));
            }
        }
        self.terminal.print_line(&menu)?;

        let input = self.read_input()?;
        let index = input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|choice| choice.checked_sub(1))
            .and_then(|position| self.user_accounts.get(position).copied())
            .ok_or(BankError::InvalidAccountSelection)?;

        self.transacting = Some(index);
        Ok(index)
    }

    fn read_amount(&mut self) -> Result<Decimal, BankError> {
        let input = self.read_input()?;
        parse_amount(&input).ok_or_else(|| BankError::invalid_amount(&input))
    }

    fn account_summary(&self, index: AccountIndex) -> (String, Decimal) {
        self.accounts
            .get(index)
            .map(|account| (account.to_string(), account.balance))
            .unwrap_or_default()
    }

    fn deposit(&mut self) -> Result<SessionState, BankError> {
        let index = self.select_account("Which account do you wish to deposit to:")?;

        self.terminal.print_line("How much do you wish to deposit?")?;
        let amount = self.read_amount()?;

        let balance = self.accounts.deposit(index, amount)?;
        tracing::debug!(account = index, %amount, %balance, "Deposit applied");

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn withdraw(&mut self) -> Result<SessionState, BankError> {
        let index = self.select_account("Which account do you wish to withdraw from:")?;

        let (_, balance) = self.account_summary(index);
        self.terminal.print_line(&format!(
            "How much do you wish to withdraw? Balance = ${}",
            format_amount(balance)
        ))?;
        let amount = self.read_amount()?;

        match self.accounts.withdraw(index, amount) {
            Ok(balance) => {
                tracing::debug!(account = index, %amount, %balance, "Withdrawal applied");
            }
            Err(e @ BankError::InsufficientFunds { .. }) => {
                self.terminal.print_line(&e.to_string())?;
            }
            Err(e) => return Err(e),
        }

        // Printed whether or not the withdrawal went through
        let (account, balance) = self.account_summary(index);
        self.terminal.print_line(&format!(
            "Your new balance for {} is ${}",
            account,
            format_amount(balance)
        ))?;

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn view_balance(&mut self) -> Result<SessionState, BankError> {
        let index = self.select_account("Which account do you wish to view?")?;

        let (account, balance) = self.account_summary(index);
        self.terminal.print_line(&format!(
            "Current balance for account {}: ${}",
            account,
            format_amount(balance)
        ))?;

        Ok(SessionState::AwaitingMenuChoice)
    }

    fn terminate(&mut self, sink: &mut dyn AccountSink) -> Result<(), BankError> {
        for position in 0..self.user_accounts.len() {
            let (account, balance) = self.account_summary(self.user_accounts[position]);
            self.terminal
                .print_line(&format!("{}:\t${}", account, format_amount(balance)))?;
        }

        sink.save(self.accounts.accounts())
    }
}
