// CLI module
// Command-line interface, argument parsing and logging setup

mod args;

pub use args::CliArgs;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or --help), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the stderr logger
///
/// The filter comes only from `level`; no environment variable is read.
/// Falls back to `warn` if `level` is not a valid filter directive.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
