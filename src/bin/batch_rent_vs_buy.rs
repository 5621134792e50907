//! Run a batch of buy-vs-rent scenarios from a JSON file
//!
//! The file holds an array of `{"name": ..., "params": {...}}` objects; any
//! parameter left out takes its default. Summaries are printed as JSON, or
//! written to `--output`.
//!
//! Usage: cargo run --release --bin batch_rent_vs_buy -- scenarios.json

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use mortgage_planner::scenario::{Outcome, Scenario, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "batch_rent_vs_buy", about = "Run buy-vs-rent scenarios in parallel")]
struct Cli {
    /// JSON file with an array of named scenarios
    scenarios: PathBuf,
    #[arg(long, help = "Write summaries to this file instead of stdout")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let file = File::open(&cli.scenarios)
        .with_context(|| format!("Failed to open {}", cli.scenarios.display()))?;
    let scenarios: Vec<Scenario> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", cli.scenarios.display()))?;
    info!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let outcomes = ScenarioRunner::default().run_scenarios(&scenarios);
    for outcome in &outcomes {
        if let Outcome::Error(e) = &outcome.outcome {
            warn!("Scenario {} failed: {}", outcome.name, e);
        }
    }

    match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &outcomes)?;
            info!("Output written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&outcomes)?),
    }

    info!("Total time: {:?}", start.elapsed());
    Ok(())
}
