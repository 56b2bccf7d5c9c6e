//! `wh-output` — CSV reports for simulation runs and layout searches.
//!
//! [`CsvWriter`] creates one file per report in the output directory:
//!
//! | File                  | One row per                                   |
//! |-----------------------|-----------------------------------------------|
//! | `tick_summaries.csv`  | executed tick (moves, blocked, replans, …)    |
//! | `robot_snapshots.csv` | robot, every `snapshot_interval` ticks        |
//! | `robot_reports.csv`   | robot at the end of a run (energy report)     |
//! | `congestion.csv`      | visited cell at the end of a run              |
//! | `anneal_trace.csv`    | simulated-annealing iteration                 |
//! | `mosa_trace.csv`      | MOSA iteration                                |
//! | `pareto_archive.csv`  | archive member after MOSA                     |
//!
//! Writers implement [`OutputWriter`]; per-tick rows are produced by
//! [`SimOutputObserver`], which implements `wh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, OutputWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 1);
//! let sim = evaluator.simulate_with(layout.clone(), &mut rng, &mut obs)?;
//! if let Some(e) = obs.take_error() { return Err(e.into()); }
//! let mut writer = obs.into_writer();
//! writer.write_final_state(&sim.sim.robots, &sim.sim.grid)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CongestionRow, RobotReportRow, RobotSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
