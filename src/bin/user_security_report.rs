// Users, Groups and Permissions report - CLI Binary
// Run with: cargo run -- --data directory.json --actor admin@example.com show

use clap::Parser;
use user_security_report::cli::{runner, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    user_security_report::init_logging(level);

    runner::run(cli)
}
