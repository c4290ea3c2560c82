//! Collection run types

use std::fmt;
use std::time::Duration;

/// What happened to one configured pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Fetched; `rows` ride options were normalized
    Collected { rows: usize },
    /// The request failed
    Failed,
    /// A place id did not resolve; no request was made
    Skipped,
}

/// Statistics for one collection run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Configured pairs across all samples
    pub pairs_total: usize,
    /// Pairs with a successful response
    pub pairs_collected: usize,
    /// Pairs whose request failed
    pub pairs_failed: usize,
    /// Pairs with unresolvable place ids
    pub pairs_skipped: usize,
    /// Normalized ride options
    pub rows_collected: usize,
    /// Raw responses archived
    pub artifacts_written: usize,
    /// Archive, table or warehouse writes that failed
    pub storage_errors: usize,
    /// One message per failure, in order
    pub errors: Vec<String>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a pair outcome
    pub fn record(&mut self, outcome: PairOutcome) {
        match outcome {
            PairOutcome::Collected { rows } => {
                self.pairs_collected += 1;
                self.rows_collected += rows;
            }
            PairOutcome::Failed => self.pairs_failed += 1,
            PairOutcome::Skipped => self.pairs_skipped += 1,
        }
    }

    /// Count a failed write
    pub fn add_storage_error(&mut self, message: impl Into<String>) {
        self.storage_errors += 1;
        self.errors.push(message.into());
    }

    /// Add an error message
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// True when every pair was collected and every write succeeded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.pairs_collected == self.pairs_total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Collected {} ride options from {}/{} pairs in {:.2}s",
            self.rows_collected,
            self.pairs_collected,
            self.pairs_total,
            self.elapsed.as_secs_f64()
        )
    }
}
