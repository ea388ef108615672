//! Core business logic module
//!
//! This module contains the session components:
//! - `traits` - Terminal and persistence boundaries injected into the session
//! - `session` - Interactive state machine
//! - `account_manager` - Account ownership and balance operations

pub mod account_manager;
pub mod session;
pub mod traits;

pub use account_manager::{AccountIndex, AccountManager};
pub use session::{MenuChoice, Session, SessionState};
pub use traits::{AccountSink, Terminal};
