use std::path::PathBuf;

/// Format of the per-pair log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// `<timestamp> - INFO - x=.., y=.., ...` lines.
    #[default]
    Text,
    /// Comma separated values with a header row.
    Csv,
}

/// Runtime options for one invocation of the finder.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the per-pair log is appended. `None` disables it.
    pub log_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Print a status line every this many pairs (0 = never).
    pub status_interval: u64,
    /// Show a progress bar instead of status lines.
    pub progress: bool,
    /// Print a JSON summary instead of the text report.
    pub json: bool,
    /// Suppress the running "new smallest miss" lines.
    pub quiet: bool,
    /// Wait for Enter before exiting.
    pub pause: bool,
}

pub const DEFAULT_LOG_PATH: &str = "near_miss_log.txt";
