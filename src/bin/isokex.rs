//! isokex command-line runner
//!
//! Runs the harness phases against the reference engine and prints the
//! report.
//!
//! Usage:
//!   isokex --curve REFp62 --seed 7 --format json

use std::num::NonZeroUsize;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use isokex::engine::ReferenceEngine;
use isokex::harness::{Harness, HarnessConfig};
use isokex::params::parameter_set;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "isokex",
    version,
    about = "Verify and benchmark an isogeny-based key-exchange engine"
)]
struct Args {
    /// Curve parameter set identifier
    #[arg(long, env = "ISOKEX_CURVE", default_value = "REFp62")]
    curve: String,

    /// Trials per key-exchange verification pass
    #[arg(long, env = "ISOKEX_TRIALS")]
    trials: Option<NonZeroUsize>,

    /// Iterations averaged per benchmarked operation
    #[arg(long, env = "ISOKEX_BENCH_LOOPS")]
    bench_loops: Option<NonZeroUsize>,

    /// Seed the engine randomness for a replayable run
    #[arg(long, env = "ISOKEX_SEED")]
    seed: Option<u64>,

    /// Skip both benchmark phases
    #[arg(long)]
    no_bench: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Args {
    fn config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        if let Some(trials) = self.trials {
            config = config.with_trials(trials);
        }
        if let Some(loops) = self.bench_loops {
            config = config.with_bench_loops(loops);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.no_bench {
            config = config.without_benchmarks();
        }
        config
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let params = parameter_set(&args.curve)
        .with_context(|| format!("Unknown curve parameter set: {}", args.curve))?;

    let engine = ReferenceEngine::new();
    let config = args.config();
    info!(curve = params.id, ?config, "starting harness");

    let report = Harness::new(&engine, params, config).run();

    match args.format {
        Format::Text => print!("{}", report),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
