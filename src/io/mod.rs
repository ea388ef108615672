//! I/O module
//!
//! Handles the store file formats, file access and the operator terminal.
//!
//! # Components
//!
//! - `csv_format` - Record parsing, the `|||` delimiter fold and account serialization
//! - `store` - Loading the store files and saving the accounts file
//! - `terminal` - Line-based terminal over any reader/writer pair

pub mod csv_format;
pub mod store;
pub mod terminal;

pub use csv_format::{fold_delimiter, parse_accounts, parse_users, write_accounts};
pub use store::{load_accounts, load_users, FileStore};
pub use terminal::LineTerminal;
