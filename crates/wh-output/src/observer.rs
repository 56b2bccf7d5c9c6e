//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wh_core::Tick;
use wh_grid::Grid;
use wh_robot::RobotStore;
use wh_sim::{RunStatus, SimObserver, TickStats};

use crate::row::{RobotSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes one tick summary per executed tick and,
/// every `snapshot_interval` ticks, one position row per robot.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    /// `0` disables snapshots.
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, snapshot_interval: u64) -> Self {
        Self { writer, snapshot_interval, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer, e.g. to append end-of-run reports.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "report write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::new(tick, stats));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, robots: &RobotStore, _grid: &Grid) {
        if self.snapshot_interval == 0 || tick.0 % self.snapshot_interval != 0 {
            return;
        }
        let rows = RobotSnapshotRow::collect(tick, robots);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick, _status: RunStatus) {
        let result = self.writer.flush();
        self.store_err(result);
    }
}
