//! Simulation observer trait for progress reporting and data collection.

use wh_core::Tick;
use wh_grid::Grid;
use wh_robot::RobotStore;

use crate::{RunStatus, TickStats};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         println!("{tick}: {} moves, {} blocked", stats.moves, stats.blocked);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any robot acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every robot has acted and marked robots have replanned.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called right after `on_tick_end` with read-only access to robot and
    /// grid state, so observers can record positions or congestion without
    /// the engine knowing about any output format.
    fn on_snapshot(&mut self, _tick: Tick, _robots: &RobotStore, _grid: &Grid) {}

    /// Called once when the run reaches a terminal status.  `final_tick` is
    /// the number of ticks executed.
    fn on_run_end(&mut self, _final_tick: Tick, _status: RunStatus) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
