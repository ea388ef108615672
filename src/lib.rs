//! ATM Terminal Library
//! # Overview
//!
//! This library provides a single-session banking terminal backed by two flat files:
//! a comma-separated user file and an accounts file whose fields are separated by `|||`.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (User, Account, AccountKind, BankError)
//! - [`cli`] - CLI arguments parsing and logging setup
//! - [`core`] - Business logic components:
//!   - [`core::session`] - Interactive state machine
//!   - [`core::account_manager`] - Account ownership and balance operations
//!   - [`core::traits`] - Terminal and persistence boundaries
//! - [`io`] - Store formats, file access and the line terminal
//!
//! # Session Flow
//!
//! 1. Both store files are loaded completely; a malformed row aborts startup
//! 2. The operator authenticates with a user identifier
//! 3. Deposits, withdrawals and balance inquiries run against that user's accounts
//! 4. On quit, the user's balances are printed and every account is written back
//!
//! # Account Kinds
//!
//! - **Checking**: persisted with the type tag `Cheque`
//! - **Savings**: persisted with the type tag `Saving`
//!
//! Rows with any other tag are skipped when loading.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{AccountManager, AccountSink, Session, SessionState, Terminal};
pub use io::{load_accounts, load_users, FileStore, LineTerminal};
pub use types::{Account, AccountKind, BankError, User};
