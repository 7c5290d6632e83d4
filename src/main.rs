use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fermat_near_miss::config::{Config, LogFormat, DEFAULT_LOG_PATH};
use fermat_near_miss::io_utils::{io_cli_error, near_miss_cli_error};
use fermat_near_miss::{
    ConsoleReport, CsvLog, NearMissError, NearMissSearcher, Progress, Prompter, RecordSink,
    SearchParameters, Tee, TextLog,
};

/// Search 10 <= x, y <= k for the pair whose x^n + y^n comes closest to an
/// n-th power.
#[derive(Parser, Debug)]
#[command(name = "fermat-near-miss", version)]
struct Args {
    /// Exponent n (3 <= n < 12). Prompted for when omitted.
    #[arg(short = 'n', long = "exponent", allow_negative_numbers = true)]
    n: Option<i64>,
    /// Upper bound k (k > 10). Prompted for when omitted.
    #[arg(short = 'k', long = "bound", allow_negative_numbers = true)]
    k: Option<i64>,
    /// Append the per-pair log to this file.
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    /// Do not write the per-pair log.
    #[arg(long)]
    no_log: bool,
    /// Print a JSON summary instead of the text report.
    #[arg(long)]
    json: bool,
    /// Show a progress bar on stderr.
    #[arg(long)]
    progress: bool,
    /// Print a status line to stderr every N pairs.
    #[arg(long, default_value_t = 0)]
    status_interval: u64,
    /// Only print the final result.
    #[arg(long)]
    quiet: bool,
    /// Exit without waiting for Enter after an interactive run.
    #[arg(long)]
    no_pause: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            log_path: (!self.no_log).then(|| self.log.clone()),
            log_format: self.log_format,
            status_interval: self.status_interval,
            progress: self.progress,
            json: self.json,
            quiet: self.quiet,
            pause: !self.no_pause,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.config();

    let interactive = args.n.is_none() || args.k.is_none();
    let params = match (args.n, args.k) {
        (Some(n), Some(k)) => SearchParameters::new(n, k)
            .map_err(|e| near_miss_cli_error("invalid parameters", e))?,
        _ => read_missing(args.n, args.k)
            .map_err(|e| near_miss_cli_error("reading parameters", e))?,
    };

    let log = open_log(&config)?;
    let progress = if config.progress {
        Some(Progress::bar(
            u64::try_from(params.pair_count()).unwrap_or(u64::MAX),
        ))
    } else if config.status_interval > 0 {
        Some(Progress::every(config.status_interval))
    } else {
        None
    };
    let console = ConsoleReport::new(io::stdout(), params)
        .json(config.json)
        .quiet(config.quiet);

    let outcome = NearMissSearcher::new(params)
        .run(Tee::new(log, Tee::new(progress, console)))
        .map_err(|e| near_miss_cli_error("search failed", e))?;
    if !config.quiet && !config.json {
        outcome.stats.report();
    }

    if interactive && config.pause {
        Prompter::new(io::stdin().lock(), io::stdout())
            .wait_for_exit()
            .map_err(|e| near_miss_cli_error("reading input", e))?;
    }
    Ok(())
}

/// Prompt on stdin for whichever of `n` and `k` were not given as flags.
fn read_missing(n: Option<i64>, k: Option<i64>) -> Result<SearchParameters, NearMissError> {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    match (n, k) {
        (None, None) => prompter.read_parameters(),
        (Some(n), None) => SearchParameters::new(n, prompter.read_bound()?),
        (None, Some(k)) => SearchParameters::new(prompter.read_exponent()?, k),
        (Some(n), Some(k)) => SearchParameters::new(n, k),
    }
}

type LogSink = Box<dyn RecordSink<Error = NearMissError>>;

fn open_log(config: &Config) -> Result<Option<LogSink>, Box<dyn std::error::Error>> {
    let Some(path) = &config.log_path else {
        return Ok(None);
    };
    let sink: LogSink = match config.log_format {
        LogFormat::Text => Box::new(
            TextLog::append(path).map_err(|e| io_cli_error("opening log file", path, e))?,
        ),
        LogFormat::Csv => Box::new(CsvLog::append(path).map_err(|e| match e {
            NearMissError::Io(io) => io_cli_error("opening log file", path, io),
            other => near_miss_cli_error("opening log file", other),
        })?),
    };
    Ok(Some(sink))
}
