//! `SearchStats` counts evaluated pairs and best-so-far improvements for a
//! single search and times the run.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchStats {
    start_time: Instant,
    pub pairs_evaluated: u64,
    pub improvements: u64,
    pub exact_hits: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            pairs_evaluated: 0,
            improvements: 0,
            exact_hits: 0,
        }
    }

    pub fn tick_pair(&mut self, exact: bool) {
        self.pairs_evaluated += 1;
        if exact {
            self.exact_hits += 1;
        }
    }

    pub fn log_improvement(&mut self) {
        self.improvements += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn report(&self) {
        eprintln!(
            "Evaluated {} pairs in {:.2?}, best improved {} times, exact hits {}",
            self.pairs_evaluated,
            self.elapsed(),
            self.improvements,
            self.exact_hits
        );
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}
