//! Aggregation of Contents lines into a package leaderboard, and ranking.

use std::collections::HashMap;

use tokio::io::AsyncBufRead;

use crate::diag::Diagnostics;
use crate::io::contents::{ContentsError, ContentsReader};

/// Mapping from package name to the number of file paths associated with it.
///
/// Built once per run, fully in memory, and discarded after reporting.
/// Memory grows with the number of distinct packages (tens of thousands),
/// not with the number of index lines (millions) -- which is why the input
/// is streamed rather than buffered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    counts: HashMap<String, u64>,
}

impl Leaderboard {
    /// Empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file association for `package`.
    pub fn record(&mut self, package: &str) {
        // Explicit get-or-zero, then increment.
        let count = self.counts.entry(package.to_owned()).or_insert(0);
        *count += 1;
    }

    /// Current count for `package` (zero if never observed).
    pub fn count(&self, package: &str) -> u64 {
        self.counts.get(package).copied().unwrap_or(0)
    }

    /// Number of distinct package names observed.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True if no package has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Fold one Contents line into the leaderboard.
    ///
    /// A line is `<path> <whitespace> <package-list>` where the package
    /// list is the *last* whitespace-separated token and is split on
    /// commas. A path may itself contain whitespace; the grammar cannot
    /// tell that apart from the separator, so the last token always wins
    /// (an accepted limitation of the index format). Adjacent commas yield
    /// an empty package name, which is counted like any other key.
    ///
    /// Lines with fewer than two tokens are malformed: they are reported
    /// through `diag` and skipped. Returns whether the line was counted.
    pub fn observe_line<D: Diagnostics>(&mut self, line: &str, diag: &D) -> bool {
        let mut fields = line.split_whitespace();
        let (Some(_path), Some(packages)) = (fields.next(), fields.next_back()) else {
            diag.warning(&format!("skipping malformed line: {line:?}"));
            return false;
        };

        for package in packages.split(',') {
            self.record(package);
        }
        true
    }

    /// The `top_n` entries with the highest counts, rank starting at 1.
    ///
    /// Ordered by count descending; equal counts order by package name
    /// ascending (byte-wise) so output is reproducible across runs.
    /// `top_n = 0` yields an empty result; a `top_n` beyond the number of
    /// distinct packages yields all of them.
    pub fn rank(&self, top_n: usize) -> Vec<RankedEntry> {
        let mut entries: Vec<(&String, u64)> =
            self.counts.iter().map(|(name, count)| (name, *count)).collect();
        entries.sort_unstable_by(|(name_a, count_a), (name_b, count_b)| {
            count_b.cmp(count_a).then_with(|| name_a.cmp(name_b))
        });
        entries.truncate(top_n);

        entries
            .into_iter()
            .enumerate()
            .map(|(index, (package, count))| RankedEntry {
                rank: index + 1,
                package: package.clone(),
                count,
            })
            .collect()
    }
}

/// One line of the ranked report. Produced only at report time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Position in the ranking, starting at 1.
    pub rank: usize,
    /// Package name.
    pub package: String,
    /// Number of file paths associated with the package.
    pub count: u64,
}

/// Drive the line sequence to exhaustion, folding every line into a fresh
/// [`Leaderboard`].
///
/// Per-line problems are recovered inside the reader and
/// [`Leaderboard::observe_line`]; only stream-level failures end the run.
pub async fn aggregate<R, D>(
    reader: &mut ContentsReader<R, D>,
) -> Result<Leaderboard, ContentsError>
where
    R: AsyncBufRead + Unpin,
    D: Diagnostics,
{
    let mut leaderboard = Leaderboard::new();
    while let Some(line) = reader.next_line().await? {
        leaderboard.observe_line(&line, reader.diagnostics());
    }
    Ok(leaderboard)
}
