//! Consumers of the search output.
//!
//! The search hands every record, every improvement and the final result to
//! a [`RecordSink`]. Logging, console output and progress display are all
//! sinks, so the search loop itself does no I/O.

use std::convert::Infallible;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::error::NearMissError;
use crate::params::SearchParameters;
use crate::record::{BestResult, EvaluationRecord};
use crate::stats::SearchStats;

pub trait RecordSink {
    type Error;

    /// Called once per evaluated pair, in search order.
    fn record(&mut self, record: &EvaluationRecord) -> Result<(), Self::Error>;

    /// Called right after `record` when that record became the new best.
    fn best_improved(&mut self, _best: &BestResult) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after the last pair.
    fn finish(&mut self, _best: &BestResult, _stats: &SearchStats) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl RecordSink for () {
    type Error = Infallible;

    fn record(&mut self, _record: &EvaluationRecord) -> Result<(), Infallible> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    type Error = S::Error;

    fn record(&mut self, record: &EvaluationRecord) -> Result<(), Self::Error> {
        (**self).record(record)
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), Self::Error> {
        (**self).best_improved(best)
    }

    fn finish(&mut self, best: &BestResult, stats: &SearchStats) -> Result<(), Self::Error> {
        (**self).finish(best, stats)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    type Error = S::Error;

    fn record(&mut self, record: &EvaluationRecord) -> Result<(), Self::Error> {
        (**self).record(record)
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), Self::Error> {
        (**self).best_improved(best)
    }

    fn finish(&mut self, best: &BestResult, stats: &SearchStats) -> Result<(), Self::Error> {
        (**self).finish(best, stats)
    }
}

impl<S: RecordSink> RecordSink for Option<S> {
    type Error = S::Error;

    fn record(&mut self, record: &EvaluationRecord) -> Result<(), Self::Error> {
        match self {
            Some(s) => s.record(record),
            None => Ok(()),
        }
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), Self::Error> {
        match self {
            Some(s) => s.best_improved(best),
            None => Ok(()),
        }
    }

    fn finish(&mut self, best: &BestResult, stats: &SearchStats) -> Result<(), Self::Error> {
        match self {
            Some(s) => s.finish(best, stats),
            None => Ok(()),
        }
    }
}

/// Sends everything to two sinks, `A` first.
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> RecordSink for Tee<A, B>
where
    A: RecordSink,
    B: RecordSink<Error = A::Error>,
{
    type Error = A::Error;

    fn record(&mut self, record: &EvaluationRecord) -> Result<(), Self::Error> {
        self.first.record(record)?;
        self.second.record(record)
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), Self::Error> {
        self.first.best_improved(best)?;
        self.second.best_improved(best)
    }

    fn finish(&mut self, best: &BestResult, stats: &SearchStats) -> Result<(), Self::Error> {
        self.first.finish(best, stats)?;
        self.second.finish(best, stats)
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct Collector {
    pub records: Vec<EvaluationRecord>,
    pub improvements: Vec<BestResult>,
    pub finished: Option<BestResult>,
}

impl RecordSink for Collector {
    type Error = Infallible;

    fn record(&mut self, record: &EvaluationRecord) -> Result<(), Infallible> {
        self.records.push(record.clone());
        Ok(())
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), Infallible> {
        self.improvements.push(best.clone());
        Ok(())
    }

    fn finish(&mut self, best: &BestResult, _stats: &SearchStats) -> Result<(), Infallible> {
        self.finished = Some(best.clone());
        Ok(())
    }
}

/// Timestamp used on every log line, e.g. `2024-06-15 09:30:00,123`.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S,%3f").to_string()
}

/// Append-only, one line per evaluated pair.
pub struct TextLog<W: Write> {
    out: W,
}

impl TextLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed. Existing content is
    /// never truncated.
    pub fn append<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TextLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for TextLog<W> {
    type Error = NearMissError;

    fn record(&mut self, r: &EvaluationRecord) -> Result<(), NearMissError> {
        writeln!(
            self.out,
            "{} - INFO - x={}, y={}, z={}, miss1={}, miss2={}, relative_miss={}",
            timestamp(),
            r.x,
            r.y,
            r.z,
            r.miss_below,
            r.miss_above,
            r.relative_miss
        )?;
        Ok(())
    }

    fn finish(&mut self, _best: &BestResult, _stats: &SearchStats) -> Result<(), NearMissError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Column names of the CSV log.
pub const CSV_HEADER: [&str; 7] = [
    "timestamp",
    "x",
    "y",
    "z",
    "miss_below",
    "miss_above",
    "relative_miss",
];

/// CSV flavour of [`TextLog`]. The header row is only written to an empty
/// file so repeated runs keep appending to one table.
pub struct CsvLog<W: Write> {
    wtr: csv::Writer<W>,
}

impl CsvLog<File> {
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self, NearMissError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let empty = file.metadata()?.len() == 0;
        Self::new(file, empty)
    }
}

impl<W: Write> CsvLog<W> {
    pub fn new(out: W, write_header: bool) -> Result<Self, NearMissError> {
        let mut wtr = csv::Writer::from_writer(out);
        if write_header {
            wtr.write_record(CSV_HEADER)?;
        }
        Ok(Self { wtr })
    }

    pub fn into_inner(self) -> Result<W, NearMissError> {
        self.wtr
            .into_inner()
            .map_err(|e| NearMissError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

impl<W: Write> RecordSink for CsvLog<W> {
    type Error = NearMissError;

    fn record(&mut self, r: &EvaluationRecord) -> Result<(), NearMissError> {
        self.wtr.write_record(&[
            timestamp(),
            r.x.to_string(),
            r.y.to_string(),
            r.z.to_string(),
            r.miss_below.to_string(),
            r.miss_above.to_string(),
            r.relative_miss.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self, _best: &BestResult, _stats: &SearchStats) -> Result<(), NearMissError> {
        self.wtr.flush()?;
        Ok(())
    }
}

/// JSON document printed by [`ConsoleReport`] in JSON mode.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub n: u32,
    pub k: u64,
    pub pairs_evaluated: u64,
    pub improvements: u64,
    pub exact_hits: u64,
    pub best: &'a BestResult,
    pub elapsed_ms: u128,
}

/// User-facing output: each new best as it is found, then the final answer.
pub struct ConsoleReport<W: Write> {
    out: W,
    params: SearchParameters,
    json: bool,
    quiet: bool,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W, params: SearchParameters) -> Self {
        Self {
            out,
            params,
            json: false,
            quiet: false,
        }
    }

    /// Print only a JSON summary at the end.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Skip the running "new smallest miss" lines.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for ConsoleReport<W> {
    type Error = NearMissError;

    fn record(&mut self, _record: &EvaluationRecord) -> Result<(), NearMissError> {
        Ok(())
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), NearMissError> {
        if self.json || self.quiet {
            return Ok(());
        }
        writeln!(
            self.out,
            "New smallest miss found: x={}, y={}, z={}, miss={}, relative miss={:.8}",
            best.x, best.y, best.z, best.miss, best.relative_miss
        )?;
        Ok(())
    }

    fn finish(&mut self, best: &BestResult, stats: &SearchStats) -> Result<(), NearMissError> {
        if self.json {
            let summary = Summary {
                n: self.params.exponent(),
                k: self.params.bound(),
                pairs_evaluated: stats.pairs_evaluated,
                improvements: stats.improvements,
                exact_hits: stats.exact_hits,
                best,
                elapsed_ms: stats.elapsed().as_millis(),
            };
            writeln!(self.out, "{}", serde_json::to_string_pretty(&summary)?)?;
        } else {
            writeln!(self.out, "\nSmallest miss found:")?;
            writeln!(
                self.out,
                "x={}, y={}, z={}, miss={}, relative miss={:.8}",
                best.x, best.y, best.z, best.miss, best.relative_miss
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Progress feedback on stderr: an `indicatif` bar, or a status line every
/// `interval` pairs.
pub struct Progress {
    bar: Option<ProgressBar>,
    interval: u64,
    seen: u64,
}

impl Progress {
    pub fn bar(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::with_template("{elapsed_precise} [{bar:40}] {pos}/{len} pairs ({eta}) {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self {
            bar: Some(bar),
            interval: 0,
            seen: 0,
        }
    }

    pub fn every(interval: u64) -> Self {
        Self {
            bar: None,
            interval,
            seen: 0,
        }
    }
}

impl RecordSink for Progress {
    type Error = NearMissError;

    fn record(&mut self, r: &EvaluationRecord) -> Result<(), NearMissError> {
        self.seen += 1;
        if let Some(bar) = &self.bar {
            bar.inc(1);
        } else if self.interval > 0 && self.seen % self.interval == 0 {
            eprintln!("[{} pairs] at x={}, y={}", self.seen, r.x, r.y);
        }
        Ok(())
    }

    fn best_improved(&mut self, best: &BestResult) -> Result<(), NearMissError> {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("best x={} y={}", best.x, best.y));
        }
        Ok(())
    }

    fn finish(&mut self, _best: &BestResult, _stats: &SearchStats) -> Result<(), NearMissError> {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        Ok(())
    }
}
