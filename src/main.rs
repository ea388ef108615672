//! ATM Terminal CLI
//!
//! Interactive banking terminal over two flat-file stores.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- data/UserInfo.txt data/OpeningAccountsData.txt
//! cargo run -- --log-level info users.txt accounts.txt
//! ```
//!
//! Both files are loaded before the first prompt. The operator interacts on
//! stdin/stdout, and on quit the accounts file is rewritten in place.
//! Diagnostics go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Session ended with quit and the accounts were saved
//! - 1: Error (file not found, malformed record, input closed, save failed, etc.)

use atm_terminal::cli;
use atm_terminal::core::Session;
use atm_terminal::io::{load_accounts, load_users, FileStore, LineTerminal};
use atm_terminal::BankError;
use std::process;

fn run(args: &cli::CliArgs) -> Result<(), BankError> {
    // Load completes before any interaction
    let users = load_users(&args.users_file)?;
    let accounts = load_accounts(&args.accounts_file)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let terminal = LineTerminal::new(stdin.lock(), stdout.lock());

    let mut store = FileStore::new(&args.accounts_file);
    let mut session = Session::new(users, accounts, terminal);
    session.run(&mut store)
}

fn main() {
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
