use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use primer_intervals::{
    read_intervals, ConsoleSink, FileSink, Interval, IntervalSet, PrimeSink, SearchConfig, SieveCoordinator,
};

#[derive(Parser)]
#[command(name = "primer", version, about = "Find the primes inside integer intervals with a multi-threaded wheel sieve")]
struct Cli {
    /// Interval document: <root><intervals><interval><low/><high/></interval>...
    #[arg(env = "PRIMER_INPUT", required_unless_present = "range")]
    input: Option<PathBuf>,

    /// Inline interval LOW-HIGH, may be repeated
    #[arg(long, value_name = "LOW-HIGH")]
    range: Vec<Interval>,

    /// Also write the primes as an XML document
    #[arg(short, long, env = "PRIMER_OUTPUT")]
    output: Option<PathBuf>,

    /// Worker threads (1-48); derived from cores and interval count when unset
    #[arg(short, long, env = "PRIMER_THREADS")]
    threads: Option<usize>,

    /// Primes baked into the wheel (1-6); picked from the tuning table when unset
    #[arg(long, env = "PRIMER_WHEEL_PRIMES")]
    wheel_primes: Option<usize>,

    /// Do not print primes to stdout
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut intervals: Vec<Interval> = cli.range.clone();
    if let Some(path) = &cli.input {
        let from_file = read_intervals(path).with_context(|| format!("reading intervals from {}", path.display()))?;
        intervals.extend(from_file.iter().copied());
    }
    let intervals = IntervalSet::from_unsorted(intervals);
    for interval in &intervals {
        debug!(low = interval.low(), high = interval.high(), "interval");
    }

    let mut config = SearchConfig::new();
    if let Some(threads) = cli.threads {
        config = config.threads(threads);
    }
    if let Some(wheel_primes) = cli.wheel_primes {
        config = config.wheel_primes(wheel_primes);
    }

    let coordinator = SieveCoordinator::new(intervals, config).context("configuring search")?;
    let mut file = cli.output.as_ref().map(FileSink::create).transpose()?;

    let search = coordinator.run();
    let index = search.index();

    if !cli.quiet {
        ConsoleSink::stdout().write_primes(&mut index.iter())?;
    }
    if let Some(sink) = file.as_mut() {
        let count = sink.write_primes(&mut index.iter())?;
        debug!(count, path = %sink.path().display(), "wrote primes document");
    }

    Ok(())
}
