//! The `OutputWriter` trait implemented by report backends.

use wh_grid::Grid;
use wh_optim::{AnnealStep, MosaStep, ParetoArchive};
use wh_robot::RobotStore;

use crate::{CongestionRow, OutputResult, RobotReportRow, RobotSnapshotRow, TickSummaryRow};

/// Sink for every report a run or search produces.
///
/// Errors raised while observing a simulation are stored by
/// [`SimOutputObserver`](crate::SimOutputObserver) and retrieved with
/// `take_error`.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of robot position snapshots.
    fn write_snapshots(&mut self, rows: &[RobotSnapshotRow]) -> OutputResult<()>;

    fn write_robot_reports(&mut self, rows: &[RobotReportRow]) -> OutputResult<()>;

    fn write_congestion(&mut self, rows: &[CongestionRow]) -> OutputResult<()>;

    fn write_anneal_trace(&mut self, steps: &[AnnealStep]) -> OutputResult<()>;

    fn write_mosa_trace(&mut self, steps: &[MosaStep]) -> OutputResult<()>;

    fn write_pareto_archive(&mut self, archive: &ParetoArchive) -> OutputResult<()>;

    /// Write the per-robot reports and the congestion map of a finished run.
    fn write_final_state(&mut self, robots: &RobotStore, grid: &Grid) -> OutputResult<()> {
        self.write_robot_reports(&RobotReportRow::collect(robots))?;
        self.write_congestion(&CongestionRow::collect(grid))
    }

    /// Push buffered rows to disk.  Further writes remain allowed.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush every report at the end of a session.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
