//! debtop - Debian Contents leaderboard CLI

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use debtop_cli::{Cli, cmd};

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so the ranked report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cmd::top::top(
        cli.architecture,
        cli.top_n,
        &cli.mirror,
        Duration::from_secs(cli.timeout),
    )
    .await
}
