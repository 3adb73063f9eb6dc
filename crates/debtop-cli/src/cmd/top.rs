//! Top command - fetch, aggregate, report.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};

use debtop_core::io::{contents, fetch};
use debtop_core::{Arch, report, stats};

use crate::diag::LogDiagnostics;

/// Run the whole pipeline for one architecture and print the ranked
/// report to stdout.
///
/// Strictly sequential: fetch, decompress/parse, aggregate, rank, render.
/// Any classified failure propagates out and becomes a non-zero exit.
pub async fn top(architecture: Arch, top_n: usize, mirror: &str, timeout: Duration) -> Result<()> {
    let diag = LogDiagnostics;

    let client = fetch::build_client(timeout).context("failed to build HTTP client")?;
    let stream = fetch::fetch_contents(&client, mirror, architecture, &diag).await?;
    let mut reader = contents::reader_from_bytes(stream, &diag);
    let leaderboard = stats::aggregate(&mut reader).await?;
    let ranked = leaderboard.rank(top_n);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::render(&mut out, &ranked)?;
    out.flush()?;

    Ok(())
}
