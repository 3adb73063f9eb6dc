//! Fixed-width rendering of the ranked report.

use std::fmt;
use std::io;

use crate::stats::RankedEntry;

impl fmt::Display for RankedEntry {
    /// `<rank>.` left-justified in 5 columns, package name in 50, count
    /// unpadded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = format!("{}.", self.rank);
        write!(f, "{rank:<5}{:<50}{}", self.package, self.count)
    }
}

/// Write the ranked report, one entry per line in rank order.
///
/// This is the only output that belongs on stdout; diagnostics go through
/// the injected [`Diagnostics`](crate::diag::Diagnostics) handle instead.
pub fn render<W: io::Write>(out: &mut W, entries: &[RankedEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}
