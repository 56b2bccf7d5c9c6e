//! warehouse — end-to-end demo for the warehouse robot simulator.
//!
//! Builds a layout, runs one baseline simulation with full CSV reporting,
//! then searches for a better layout with simulated annealing and
//! approximates the Pareto front with MOSA.
//!
//! ```text
//! RUST_LOG=debug cargo run --release -p warehouse -- --config demos/warehouse/warehouse.toml
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use wh_core::{SimConfig, SimRng};
use wh_grid::{Grid, random_layout, sample_layout};
use wh_optim::{AnnealSchedule, CostWeights, LayoutEvaluator, mosa, simulated_annealing};
use wh_output::{CsvWriter, OutputWriter, SimOutputObserver};
use wh_robot::EnergyModel;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
enum LayoutKind {
    /// Fixed 20×15 facility.
    Sample,
    /// Randomly generated from the `[layout]` parameters.
    Random,
}

/// Simulate robots on a warehouse layout and optimize the layout.
#[derive(Parser, Debug)]
#[command(name = "warehouse")]
struct Args {
    /// TOML configuration file; flags below override its values.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Seed for layout generation, robot assignment, and both optimizers.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory the CSV reports are written to.
    #[arg(long, short = 'o', default_value = "output/warehouse")]
    output: PathBuf,

    /// Layout to start from.
    #[arg(long, value_enum)]
    layout: Option<LayoutKind>,

    /// Number of robots.
    #[arg(long)]
    robots: Option<usize>,

    /// Annealing iterations for each optimizer.
    #[arg(long)]
    iterations: Option<usize>,

    /// Write robot positions every N ticks of the baseline run (0 = never).
    #[arg(long, default_value_t = 1)]
    snapshot_interval: u64,
}

// ── Configuration file ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LayoutParams {
    kind:            LayoutKind,
    width:           i32,
    height:          i32,
    robots:          usize,
    storage_density: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self { kind: LayoutKind::Random, width: 20, height: 15, robots: 5, storage_density: 0.8 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunConfig {
    seed:     u64,
    layout:   LayoutParams,
    sim:      SimConfig,
    energy:   EnergyModel,
    weights:  CostWeights,
    schedule: AnnealSchedule,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed:     42,
            layout:   LayoutParams::default(),
            sim:      SimConfig::default(),
            energy:   EnergyModel::default(),
            weights:  CostWeights::default(),
            schedule: AnnealSchedule::default(),
        }
    }
}

impl RunConfig {
    fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    fn apply(&mut self, args: &Args) {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(kind) = args.layout {
            self.layout.kind = kind;
        }
        if let Some(robots) = args.robots {
            self.layout.robots = robots;
        }
        if let Some(iterations) = args.iterations {
            self.schedule.iterations = iterations;
        }
    }

    fn build_layout(&self, rng: &mut SimRng) -> Result<Grid> {
        let p = &self.layout;
        let grid = match p.kind {
            LayoutKind::Sample => sample_layout()?,
            LayoutKind::Random => random_layout(p.width, p.height, p.robots, p.storage_density, rng)?,
        };
        Ok(grid)
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = RunConfig::load(args.config.as_deref())?;
    config.apply(&args);
    config.sim.validate()?;
    config.schedule.validate()?;

    println!("=== warehouse — robot simulation and layout optimization ===");
    println!(
        "Robots: {}  |  Max ticks: {}  |  Iterations: {}  |  Seed: {}",
        config.layout.robots, config.sim.max_ticks, config.schedule.iterations, config.seed
    );
    println!();

    // 1. Layout.
    let mut rng = SimRng::new(config.seed);
    let layout = config.build_layout(&mut rng.child(0))?;
    tracing::info!(kind = ?config.layout.kind, width = layout.width(), height = layout.height(), "layout built");
    println!(
        "Layout: {}×{}, {} docks, {} stations, {} aisles, {} storage cells",
        layout.width(),
        layout.height(),
        layout.docks().len(),
        layout.stations().len(),
        layout.aisles().len(),
        layout.blocked_cells().count(),
    );

    let evaluator = LayoutEvaluator {
        robot_count:  config.layout.robots,
        sim_config:   config.sim.clone(),
        energy_model: config.energy,
    };

    // 2. Baseline run with per-tick reporting.
    let writer = CsvWriter::new(&args.output)?;
    let mut obs = SimOutputObserver::new(writer, args.snapshot_interval);
    let t0 = Instant::now();
    let baseline = evaluator.simulate_with(layout.clone(), &mut rng.child(1), &mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing tick reports");
    }
    let mut writer = obs.into_writer();
    writer.write_final_state(&baseline.sim.robots, &baseline.sim.grid)?;
    tracing::info!(
        status = %baseline.report.status,
        ticks = baseline.report.ticks,
        metrics = ?baseline.metrics,
        "baseline run finished"
    );

    println!(
        "Baseline: {} after {} ticks in {:.3} s",
        baseline.report.status,
        baseline.report.ticks,
        t0.elapsed().as_secs_f64()
    );
    println!("{:<10} {:<10} {:<10} {:>8} {:>8} {:>8}", "Robot", "Position", "Target", "Moves", "Blocked", "Energy");
    println!("{}", "-".repeat(60));
    for id in baseline.sim.robots.ids() {
        let (Some(view), Some(report)) = (baseline.sim.robots.get(id), baseline.sim.robots.energy_report(id))
        else {
            continue;
        };
        println!(
            "{:<10} {:<10} {:<10} {:>8} {:>8} {:>8.1}",
            id.to_string(),
            view.position.to_string(),
            view.target.to_string(),
            report.successful_moves,
            report.blocked_attempts,
            report.total_energy_spent,
        );
    }
    println!();

    // 3. Single-objective search.
    let t0 = Instant::now();
    let sa = simulated_annealing(layout.clone(), &evaluator, &config.weights, &config.schedule, &mut rng.child(2))?;
    writer.write_anneal_trace(&sa.trace)?;
    tracing::info!(initial_cost = sa.initial_cost, best_cost = sa.best_cost, "single-objective search done");
    println!(
        "Simulated annealing: cost {:.2} → {:.2} in {:.3} s (distance {}, congestion {}, energy {:.1})",
        sa.initial_cost,
        sa.best_cost,
        t0.elapsed().as_secs_f64(),
        sa.best_metrics.total_distance,
        sa.best_metrics.max_congestion,
        sa.best_metrics.total_energy,
    );

    // 4. Multi-objective search.
    let t0 = Instant::now();
    let front = mosa(layout, &evaluator, &config.schedule, &mut rng.child(3))?;
    writer.write_mosa_trace(&front.trace)?;
    writer.write_pareto_archive(&front.archive)?;
    tracing::info!(archive_size = front.archive.len(), "multi-objective search done");
    println!(
        "MOSA: {} non-dominated layouts in {:.3} s",
        front.archive.len(),
        t0.elapsed().as_secs_f64()
    );
    for m in front.archive.iter() {
        println!(
            "  distance {:>5}  congestion {:>3}  energy {:>8.1}",
            m.total_distance, m.max_congestion, m.total_energy
        );
    }

    writer.finish()?;
    tracing::info!(dir = %args.output.display(), "reports written");
    println!();
    println!("Reports written to {}", args.output.display());
    Ok(())
}
