//! The exhaustive near-miss sweep.
//!
//! Pairs are visited with `x` ascending in the outer loop and `y` ascending
//! in the inner loop, both over `10..=k`, including `x == y` and both
//! orderings of every mirrored pair. Each pair is scored with exact integer
//! arithmetic and handed to the caller's [`RecordSink`].

use tracing::{debug, info};

use crate::params::{SearchParameters, START};
use crate::record::{BestResult, BestTracker, EvaluationRecord};
use crate::sink::RecordSink;
use crate::stats::SearchStats;

/// Lazy, row-major sequence of [`EvaluationRecord`]s for one parameter set.
#[derive(Debug)]
pub struct Evaluations {
    n: u32,
    k: u64,
    x: u64,
    y: u64,
}

impl Evaluations {
    pub fn new(params: SearchParameters) -> Self {
        Self {
            n: params.exponent(),
            k: params.bound(),
            x: START,
            y: START,
        }
    }

    fn remaining(&self) -> u128 {
        if self.x > self.k {
            return 0;
        }
        let side = (self.k - START + 1) as u128;
        (self.k - self.x) as u128 * side + (self.k - self.y + 1) as u128
    }

    /// Jump over `steps` pairs without scoring them.
    fn advance(&mut self, steps: u64) {
        if steps as u128 >= self.remaining() {
            self.x = self.k + 1;
            self.y = START;
            return;
        }
        let side = (self.k - START + 1) as u128;
        let offset = (self.x - START) as u128 * side + (self.y - START) as u128 + steps as u128;
        // Both quotient and remainder are at most k - 10.
        self.x = START + (offset / side) as u64;
        self.y = START + (offset % side) as u64;
    }
}

impl Iterator for Evaluations {
    type Item = EvaluationRecord;

    fn next(&mut self) -> Option<EvaluationRecord> {
        if self.x > self.k {
            return None;
        }
        let record = EvaluationRecord::evaluate(self.x, self.y, self.n);
        if self.y == self.k {
            self.x += 1;
            self.y = START;
        } else {
            self.y += 1;
        }
        Some(record)
    }

    fn nth(&mut self, n: usize) -> Option<EvaluationRecord> {
        self.advance(n as u64);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Final answer of a completed search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: BestResult,
    pub stats: SearchStats,
}

pub struct NearMissSearcher {
    params: SearchParameters,
}

impl NearMissSearcher {
    pub fn new(params: SearchParameters) -> Self {
        Self { params }
    }

    pub fn evaluations(&self) -> Evaluations {
        Evaluations::new(self.params)
    }

    /// Score every pair, reporting each record and every strict improvement
    /// of the best relative miss to `sink`, then call `sink.finish`.
    pub fn run<S: RecordSink>(&self, mut sink: S) -> Result<SearchOutcome, S::Error> {
        info!(
            n = self.params.exponent(),
            k = self.params.bound(),
            pairs = %self.params.pair_count(),
            "starting near-miss search"
        );
        let mut stats = SearchStats::new();
        let mut tracker = BestTracker::new();

        for record in self.evaluations() {
            stats.tick_pair(record.is_exact());
            sink.record(&record)?;
            if let Some(best) = tracker.offer(&record) {
                stats.log_improvement();
                debug!(
                    x = best.x,
                    y = best.y,
                    relative_miss = best.relative_miss,
                    "best improved"
                );
                sink.best_improved(best)?;
            }
        }

        let Some(best) = tracker.into_best() else {
            unreachable!("k > 10 always yields at least one pair");
        };
        sink.finish(&best, &stats)?;
        info!(
            pairs = stats.pairs_evaluated,
            improvements = stats.improvements,
            elapsed_ms = stats.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(SearchOutcome { best, stats })
    }
}

/// Run a full search, returning the smallest relative miss found.
pub fn search<S: RecordSink>(params: SearchParameters, sink: S) -> Result<BestResult, S::Error> {
    NearMissSearcher::new(params).run(sink).map(|o| o.best)
}
