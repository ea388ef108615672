//! Boundary traits for the session engine
//!
//! The session never touches stdin, stdout or the filesystem directly. It is
//! handed a [`Terminal`] for operator interaction and an [`AccountSink`] for
//! the final save, which lets tests drive it with scripted input.

use crate::types::{Account, BankError};

/// Line-oriented operator terminal
pub trait Terminal {
    /// Block until the next input line is available
    ///
    /// Returns `Ok(None)` when the input has been closed. The line terminator
    /// is not part of the returned text.
    fn read_line(&mut self) -> Result<Option<String>, BankError>;

    /// Print one line of output
    fn print_line(&mut self, line: &str) -> Result<(), BankError>;
}

/// Destination for the persisted account collection
pub trait AccountSink {
    /// Persist the complete account collection, replacing what was stored before
    fn save(&mut self, accounts: &[Account]) -> Result<(), BankError>;
}
