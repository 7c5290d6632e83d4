//! Exhaustive search for near misses to Fermat's Last Theorem.
//!
//! For an exponent `n` and bound `k` every pair `10 <= x, y <= k` is scored
//! by how close `x^n + y^n` comes to an n-th power, relative to its size.
//! All powers and roots are computed exactly with [`num_bigint::BigUint`].

pub mod config;
pub mod error;
pub mod io_utils;
pub mod neighbor;
pub mod params;
pub mod prompt;
pub mod record;
pub mod root;
pub mod search;
pub mod sink;
pub mod stats;

pub use config::{Config, LogFormat};
pub use error::NearMissError;
pub use neighbor::PowerNeighbor;
pub use params::SearchParameters;
pub use prompt::Prompter;
pub use record::{BestResult, BestTracker, EvaluationRecord};
pub use root::integer_root;
pub use search::{search, Evaluations, NearMissSearcher, SearchOutcome};
pub use sink::{Collector, ConsoleReport, CsvLog, Progress, RecordSink, Tee, TextLog};
pub use stats::SearchStats;
