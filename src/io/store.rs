//! File-backed user and account stores
//!
//! Loading reads each file fully before parsing, and saving overwrites the
//! accounts file in place.
//!
//! # Known limitation
//!
//! [`FileStore::save`] truncates the destination and writes it directly. There
//! is no temp-file swap, so a failure part way through may leave the accounts
//! file truncated or empty. The failure is reported as
//! `PersistenceWriteFailure` and is never retried.

use crate::core::traits::AccountSink;
use crate::io::csv_format::{parse_accounts, parse_users, write_accounts};
use crate::types::{Account, BankError, User};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

fn read_source(path: &Path) -> Result<String, BankError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BankError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => BankError::Io {
            message: format!("Failed to read '{}': {}", path.display(), e),
        },
    })
}

/// Load all users from the user information file
///
/// # Errors
///
/// * `FileNotFound` - the file does not exist
/// * `Io` - the file could not be read
/// * `MalformedRecord` - a row could not be parsed
pub fn load_users(path: &Path) -> Result<Vec<User>, BankError> {
    let raw = read_source(path)?;
    let users = parse_users(raw.as_bytes())?;
    tracing::info!(path = %path.display(), count = users.len(), "Loaded users");
    Ok(users)
}

/// Load all accounts from the accounts file
///
/// Rows with an unknown account type are skipped; see
/// [`parse_accounts`](crate::io::csv_format::parse_accounts).
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, BankError> {
    let raw = read_source(path)?;
    let accounts = parse_accounts(&raw)?;
    tracing::info!(path = %path.display(), count = accounts.len(), "Loaded accounts");
    Ok(accounts)
}

/// Accounts file the session writes to on quit
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountSink for FileStore {
    fn save(&mut self, accounts: &[Account]) -> Result<(), BankError> {
        let path = self.path.display().to_string();
        let file = File::create(&self.path)
            .map_err(|e| BankError::persistence_write_failure(&path, e.to_string()))?;

        let mut writer = BufWriter::new(file);
        write_accounts(accounts, &mut writer)
            .map_err(|e| BankError::persistence_write_failure(&path, e.to_string()))?;

        tracing::info!(path = %path, count = accounts.len(), "Saved accounts");
        Ok(())
    }
}
