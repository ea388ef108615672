use clap::Parser;
use std::path::PathBuf;

/// Run an interactive banking terminal over flat-file stores
#[derive(Parser, Debug)]
#[command(name = "atm-terminal")]
#[command(about = "Interactive banking terminal over flat-file stores", long_about = None)]
pub struct CliArgs {
    /// User information file (comma-separated)
    #[arg(
        value_name = "USERS",
        default_value = "data/UserInfo.txt",
        help = "Path to the user information file, relative to the working directory"
    )]
    pub users_file: PathBuf,

    /// Accounts file (`|||`-separated); rewritten on quit
    #[arg(
        value_name = "ACCOUNTS",
        default_value = "data/OpeningAccountsData.txt",
        help = "Path to the accounts file, relative to the working directory"
    )]
    pub accounts_file: PathBuf,

    /// Log filter for diagnostics written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log filter, e.g. 'warn', 'info' or 'atm_terminal=debug'"
    )]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(
        &["program"],
        "data/UserInfo.txt",
        "data/OpeningAccountsData.txt"
    )]
    #[case::users_only(
        &["program", "users.txt"],
        "users.txt",
        "data/OpeningAccountsData.txt"
    )]
    #[case::both(
        &["program", "users.txt", "accounts.txt"],
        "users.txt",
        "accounts.txt"
    )]
    fn test_path_parsing(#[case] args: &[&str], #[case] users: &str, #[case] accounts: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.users_file, PathBuf::from(users));
        assert_eq!(parsed.accounts_file, PathBuf::from(accounts));
    }

    #[rstest]
    #[case::default_level(&["program"], "warn")]
    #[case::explicit_level(&["program", "--log-level", "debug"], "debug")]
    #[case::after_paths(&["program", "u.txt", "a.txt", "--log-level", "info"], "info")]
    fn test_log_level(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level, expected);
    }

    #[rstest]
    #[case::too_many_paths(&["program", "a", "b", "c"])]
    #[case::unknown_flag(&["program", "--strategy", "sync"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
