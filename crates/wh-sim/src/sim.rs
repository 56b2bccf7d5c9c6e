//! The `Sim` struct and its tick loop.

use wh_core::{RobotId, SimConfig, Tick};
use wh_grid::{Grid, Planner};
use wh_robot::RobotStore;

use crate::{CommandQueue, SimObserver, SimResult};

// ── Run outcome types ─────────────────────────────────────────────────────────

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// Every robot is on its target with nothing left to execute.
    Success,
    /// A tick made no moves and triggered no replans while work remained.
    Gridlock,
    /// `max_ticks` ticks ran without reaching either of the above.
    Timeout,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Success  => "success",
            RunStatus::Gridlock => "gridlock",
            RunStatus::Timeout  => "timeout",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tick counters passed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickStats {
    /// Successful one-cell moves.
    pub moves:    usize,
    /// Refused move attempts.
    pub blocked:  usize,
    /// Robots replanned after the move phase.
    pub replans:  usize,
    /// Robots not at target that had no command to execute.
    pub waiting:  usize,
}

/// Returned by [`Sim::run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub status: RunStatus,
    /// Ticks executed; never exceeds `config.max_ticks`.
    pub ticks:  u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The execution and replanning engine.
///
/// Each tick visits robots in ascending `RobotId` order:
///
/// 1. **Plan**: a robot with an empty queue that is not at its target asks
///    the planner for a path from its current cell.
/// 2. **Move**: the robot attempts the command at the front of its queue.
///    - Refused: the command stays queued, a blocked attempt is charged, and
///      the robot is marked for replanning.
///    - Accepted: the command is popped, the destination's congestion count
///      goes up, and if the cell had been visited before the robot pays
///      `congestion_penalty × (level − 1)` and is marked for replanning.
/// 3. **Replan**: once every robot has acted, each marked robot's queue is
///    cleared and regenerated, in marking order.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Planner> {
    pub config: SimConfig,

    /// Ticks executed so far in the current run.
    pub clock: Tick,

    /// The layout being simulated.  Only its congestion map changes.
    pub grid: Grid,

    pub robots: RobotStore,

    /// One queue per robot, indexed by `RobotId`.
    pub queues: Vec<CommandQueue>,

    pub planner: P,

    status: Option<RunStatus>,
}

impl<P: Planner> Sim<P> {
    pub(crate) fn new(config: SimConfig, grid: Grid, robots: RobotStore, planner: P) -> Self {
        let queues = vec![CommandQueue::default(); robots.len()];
        Self { config, clock: Tick::ZERO, grid, robots, queues, planner, status: None }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run to a terminal status.
    ///
    /// Resets the congestion map and the clock, plans every robot that is
    /// not at its target, then ticks until success, gridlock, or
    /// `config.max_ticks` ticks.  Timeout is a normal outcome, not an error.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        self.grid.reset_congestion();
        self.clock = Tick::ZERO;
        self.status = None;

        for id in (0..self.robot_count()).map(RobotId) {
            self.queues[id.index()].clear();
            if !self.robots.is_at_target(id) {
                self.plan(id);
            }
        }

        let status = loop {
            if self.is_complete() {
                break RunStatus::Success;
            }
            let now = self.clock;
            if now >= self.config.end_tick() {
                tracing::warn!(ticks = now.0, "run timed out before every robot arrived");
                break RunStatus::Timeout;
            }

            observer.on_tick_start(now);
            let stats = self.step()?;
            observer.on_tick_end(now, &stats);
            observer.on_snapshot(now, &self.robots, &self.grid);
            self.clock = now.next();

            if stats.moves == 0 && stats.replans == 0 && !self.is_complete() {
                tracing::debug!(tick = now.0, waiting = stats.waiting, "gridlock");
                break RunStatus::Gridlock;
            }
        };

        self.status = Some(status);
        observer.on_run_end(self.clock, status);
        tracing::debug!(status = %status, ticks = self.clock.0, "run finished");
        Ok(RunReport { status, ticks: self.clock.0 })
    }

    /// Execute one tick and return its counters.
    ///
    /// Does not advance the clock or check termination; [`run`](Self::run)
    /// does both.
    pub fn step(&mut self) -> SimResult<TickStats> {
        let mut stats = TickStats::default();
        let mut marked: Vec<RobotId> = Vec::new();

        for id in (0..self.robot_count()).map(RobotId) {
            let i = id.index();
            if self.queues[i].is_empty() && !self.robots.is_at_target(id) {
                self.plan(id);
            }
            let Some(dir) = self.queues[i].peek() else {
                if !self.robots.is_at_target(id) {
                    stats.waiting += 1;
                }
                continue;
            };

            if !self.robots.try_move(id, dir, &self.grid) {
                stats.blocked += 1;
                marked.push(id);
                continue;
            }

            self.queues[i].pop();
            stats.moves += 1;
            let Some(here) = self.robots.position(id) else { continue };
            let level = self.grid.record_congestion(here);
            if level > 1 {
                let penalty = f64::from(self.config.congestion_penalty) * f64::from(level - 1);
                self.robots.add_congestion_penalty(id, penalty)?;
                marked.push(id);
            }
        }

        for &id in &marked {
            self.plan(id);
        }
        stats.replans = marked.len();
        Ok(stats)
    }

    /// `true` when every robot is on its target with an empty queue.
    pub fn is_complete(&self) -> bool {
        self.robots.all_at_target() && self.queues.iter().all(CommandQueue::is_empty)
    }

    /// Terminal status of the last completed run.
    pub fn status(&self) -> Option<RunStatus> {
        self.status
    }

    pub fn queue(&self, id: RobotId) -> Option<&CommandQueue> {
        self.queues.get(id.index())
    }

    pub fn into_parts(self) -> (Grid, RobotStore) {
        (self.grid, self.robots)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn robot_count(&self) -> u32 {
        self.robots.len() as u32
    }

    /// Clear `id`'s queue and refill it from a fresh plan.  A robot with no
    /// path keeps an empty queue and waits.
    fn plan(&mut self, id: RobotId) {
        let i = id.index();
        self.queues[i].clear();

        let (Some(start), Some(goal)) = (self.robots.position(id), self.robots.target(id)) else {
            return;
        };
        if start == goal {
            return;
        }

        match self.planner.plan(&self.grid, start, goal, id, self.robots.positions()) {
            Some(path) => {
                tracing::debug!(robot = %id, from = %start, to = %goal, cost = path.cost, moves = path.move_count(), "planned");
                self.queues[i].load(&path);
            }
            None => {
                tracing::debug!(robot = %id, from = %start, to = %goal, "no path; waiting");
            }
        }
    }
}
