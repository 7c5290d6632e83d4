//! Best near miss for every exponent 3..=11 at a fixed bound, as CSV.
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use fermat_near_miss::io_utils::{io_cli_error, near_miss_cli_error};
use fermat_near_miss::params::{MAX_EXPONENT, MIN_EXPONENT};
use fermat_near_miss::{NearMissSearcher, SearchParameters};

#[derive(Parser)]
struct Args {
    /// Upper bound k shared by every exponent
    #[clap(short = 'k', long)]
    bound: i64,
    /// Write the table here instead of stdout
    #[clap(long)]
    out: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let out: Box<dyn Write> = match &args.out {
        Some(p) => Box::new(File::create(p).map_err(|e| io_cli_error("creating table", p, e))?),
        None => Box::new(io::stdout()),
    };
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["n", "k", "x", "y", "z", "miss", "relative_miss", "improvements"])?;

    for n in MIN_EXPONENT..MAX_EXPONENT {
        let params = SearchParameters::new(n, args.bound)
            .map_err(|e| near_miss_cli_error("invalid parameters", e))?;
        let outcome = NearMissSearcher::new(params).run(())?;
        let best = &outcome.best;
        wtr.write_record(&[
            n.to_string(),
            args.bound.to_string(),
            best.x.to_string(),
            best.y.to_string(),
            best.z.to_string(),
            best.miss.to_string(),
            format!("{:.8e}", best.relative_miss),
            outcome.stats.improvements.to_string(),
        ])?;
        eprintln!("n={n}: done in {:.2?}", outcome.stats.elapsed());
    }
    wtr.flush()?;
    Ok(())
}
