//! CSV output backend.
//!
//! Creates seven files in the configured output directory; see the crate
//! docs for the list.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use wh_optim::{AnnealStep, MosaStep, ParetoArchive};

use crate::writer::OutputWriter;
use crate::{CongestionRow, OutputResult, RobotReportRow, RobotSnapshotRow, TickSummaryRow};

/// Writes run and search reports to CSV files.
pub struct CsvWriter {
    summaries:  Writer<File>,
    snapshots:  Writer<File>,
    reports:    Writer<File>,
    congestion: Writer<File>,
    anneal:     Writer<File>,
    mosa:       Writer<File>,
    archive:    Writer<File>,
    finished:   bool,
}

fn open(dir: &Path, name: &str, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(dir.join(name))?;
    w.write_record(header)?;
    Ok(w)
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) every CSV file in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let writer = Self {
            summaries:  open(dir, "tick_summaries.csv", &["tick", "moves", "blocked", "replans", "waiting"])?,
            snapshots:  open(dir, "robot_snapshots.csv", &["tick", "robot", "x", "y", "at_target"])?,
            reports:    open(dir, "robot_reports.csv", &[
                "robot",
                "final_x",
                "final_y",
                "target_x",
                "target_y",
                "total_energy_spent",
                "successful_moves",
                "blocked_attempts",
                "total_attempts",
                "energy_efficiency",
                "distance_to_target",
                "path_length",
                "total_congestion_penalty",
            ])?,
            congestion: open(dir, "congestion.csv", &["x", "y", "visits"])?,
            anneal:     open(dir, "anneal_trace.csv", &[
                "iteration",
                "temperature",
                "current_cost",
                "candidate_cost",
                "best_cost",
                "accepted",
            ])?,
            mosa:       open(dir, "mosa_trace.csv", &["iteration", "temperature", "archive_size", "moved"])?,
            archive:    open(dir, "pareto_archive.csv", &["total_distance", "max_congestion", "total_energy"])?,
            finished:   false,
        };
        tracing::debug!(dir = %dir.display(), "csv reports opened");
        Ok(writer)
    }

    fn writers(&mut self) -> [&mut Writer<File>; 7] {
        [
            &mut self.summaries,
            &mut self.snapshots,
            &mut self.reports,
            &mut self.congestion,
            &mut self.anneal,
            &mut self.mosa,
            &mut self.archive,
        ]
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.moves.to_string(),
            row.blocked.to_string(),
            row.replans.to_string(),
            row.waiting.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.robot.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                (row.at_target as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_robot_reports(&mut self, rows: &[RobotReportRow]) -> OutputResult<()> {
        for row in rows {
            let e = &row.energy;
            self.reports.write_record(&[
                row.robot.to_string(),
                row.final_x.to_string(),
                row.final_y.to_string(),
                row.target_x.to_string(),
                row.target_y.to_string(),
                e.total_energy_spent.to_string(),
                e.successful_moves.to_string(),
                e.blocked_attempts.to_string(),
                e.total_attempts.to_string(),
                e.energy_efficiency.to_string(),
                e.distance_to_target.to_string(),
                e.path_length.to_string(),
                e.total_congestion_penalty.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_congestion(&mut self, rows: &[CongestionRow]) -> OutputResult<()> {
        for row in rows {
            self.congestion.write_record(&[row.x.to_string(), row.y.to_string(), row.visits.to_string()])?;
        }
        Ok(())
    }

    fn write_anneal_trace(&mut self, steps: &[AnnealStep]) -> OutputResult<()> {
        for step in steps {
            self.anneal.write_record(&[
                step.iteration.to_string(),
                step.temperature.to_string(),
                step.current_cost.to_string(),
                step.candidate_cost.to_string(),
                step.best_cost.to_string(),
                (step.accepted as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_mosa_trace(&mut self, steps: &[MosaStep]) -> OutputResult<()> {
        for step in steps {
            self.mosa.write_record(&[
                step.iteration.to_string(),
                step.temperature.to_string(),
                step.archive_size.to_string(),
                (step.moved as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_pareto_archive(&mut self, archive: &ParetoArchive) -> OutputResult<()> {
        for m in archive.iter() {
            self.archive.write_record(&[
                m.total_distance.to_string(),
                m.max_congestion.to_string(),
                m.total_energy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        for w in self.writers() {
            w.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush()
    }
}
