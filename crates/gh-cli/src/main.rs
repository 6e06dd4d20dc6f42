//! `gridhaul` — run a warehouse courier simulation from a JSON config.
//!
//! ```text
//! gridhaul world.json --rounds 200 --seed 7 --display --csv run.csv
//! ```
//!
//! Exit status is 0 on success and non-zero on config errors, bounds
//! violations, unknown strategies, or an illegal intention mid-run.

mod config;


use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gh_core::Tick;
use gh_grid::Grid;
use gh_output::{CsvObserver, RunReport, TickCsv, render};
use gh_sim::{SimObserver, TickStats};

// ── Arguments ─────────────────────────────────────────────────────────────────

/// Warehouse courier simulation testbed.
#[derive(Parser, Debug)]
#[command(name = "gridhaul", version, about)]
struct Cli {
    /// Path to the JSON world configuration.
    config_file: PathBuf,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 100)]
    rounds: u64,

    /// Render the board after every tick.
    #[arg(long)]
    display: bool,

    /// Reserved agent-policy flag; accepted and recorded, currently without
    /// behavioural effect.
    #[arg(long)]
    selfishness: Option<bool>,

    /// RNG seed.  Identical seeds reproduce identical runs.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write a per-tick CSV log to this file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tick-boundary side effects selected by the flags: board rendering and the
/// CSV log.
struct RunObserver {
    display: bool,
    csv: Option<CsvObserver>,
}

impl SimObserver for RunObserver {
    fn on_tick_end(&mut self, stats: &TickStats, grid: &Grid) {
        if self.display {
            println!("after {}:", stats.tick);
            print!("{}", render(grid));
        }
        if let Some(csv) = &mut self.csv {
            csv.on_tick_end(stats, grid);
        }
    }

    fn on_run_end(&mut self, final_tick: Tick, grid: &Grid) {
        if let Some(csv) = &mut self.csv {
            csv.on_run_end(final_tick, grid);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let cfg = config::load(&cli.config_file)
        .with_context(|| format!("loading {}", cli.config_file.display()))?;
    let mut env = config::build_environment(&cfg, cli.seed, cli.selfishness.unwrap_or(false))?;

    let csv = match &cli.csv {
        Some(path) => Some(CsvObserver::new(
            TickCsv::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };
    let mut observer = RunObserver {
        display: cli.display,
        csv,
    };

    env.run(cli.rounds, &mut observer)
        .context("simulation failed")?;

    if let Some(csv) = observer.csv.as_mut() {
        if let Some(err) = csv.take_error() {
            return Err(err).context("writing the CSV log");
        }
    }

    print!("{}", RunReport::collect(&env.grid, cli.rounds));
    Ok(())
}
