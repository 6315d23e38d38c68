//! Gridcalc - evaluate a grid of postfix expressions with cell references

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gridcalc_core::storage::DEFAULT_PRECISION;
use gridcalc_core::{Document, GridcalcError};
use tracing::{error, info};

/// Evaluation failed, or input/output could not be read or written.
const EXIT_FAILURE: u8 = 1;
/// The sheet description is malformed (same status clap uses for bad flags).
const EXIT_CONFIG: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "gridcalc", version)]
#[command(about = "Evaluate a grid of postfix expressions with cell references")]
struct Cli {
    /// Sheet description to evaluate (standard input when absent or `-`)
    input: Option<PathBuf>,

    /// Write results to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fractional digits per value
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Log more to standard error (repeatable; RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "run failed");
            // Diagnostics go to stdout; stderr carries only logs.
            println!("{err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut doc = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => Document::open(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        _ => Document::from_reader(io::stdin().lock())?,
    };

    doc.calculate()?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            doc.write_results(&mut BufWriter::new(file), cli.precision)?;
            info!(path = %path.display(), "results written");
        }
        None => doc.write_results(&mut io::stdout().lock(), cli.precision)?,
    }
    Ok(())
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GridcalcError>() {
        Some(GridcalcError::Load(_)) => EXIT_CONFIG,
        _ => EXIT_FAILURE,
    }
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}
