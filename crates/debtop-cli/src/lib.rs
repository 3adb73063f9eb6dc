//! debtop - file-count leaderboard for Debian Contents indices.
//!
//! Fetches the `Contents-<arch>.gz` index for one architecture from a
//! Debian mirror, streams it through gzip decompression, counts how many
//! file paths each package owns, and prints the packages with the most
//! associated files. The ranked report is the only stdout output;
//! diagnostics go to stderr.

pub mod cmd;
pub mod diag;

use clap::Parser;
use debtop_core::Arch;
use debtop_core::io::fetch;

/// Command-line interface of `debtop`.
#[derive(Debug, Parser)]
#[command(name = "debtop")]
#[command(author, version, about = "Show the Debian packages with the most associated files")]
pub struct Cli {
    /// Architecture of the Contents index to analyze
    #[arg(value_enum)]
    pub architecture: Arch,

    /// Number of top packages to display
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Debian mirror base URL
    #[arg(long, env = "DEBTOP_MIRROR", default_value = fetch::DEFAULT_MIRROR)]
    pub mirror: String,

    /// Mirror connect/read timeout in seconds
    #[arg(long, default_value_t = fetch::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}
