//! Plain data row types written by output backends.

use wh_core::{RobotId, Tick};
use wh_grid::Grid;
use wh_robot::{EnergyReport, RobotStore};
use wh_sim::TickStats;

/// Counters for one executed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:    u64,
    pub moves:   u64,
    pub blocked: u64,
    pub replans: u64,
    pub waiting: u64,
}

impl TickSummaryRow {
    pub fn new(tick: Tick, stats: &TickStats) -> Self {
        Self {
            tick:    tick.0,
            moves:   stats.moves as u64,
            blocked: stats.blocked as u64,
            replans: stats.replans as u64,
            waiting: stats.waiting as u64,
        }
    }
}

/// One robot's position at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotSnapshotRow {
    pub tick:      u64,
    pub robot:     RobotId,
    pub x:         i32,
    pub y:         i32,
    pub at_target: bool,
}

impl RobotSnapshotRow {
    /// One row per robot, in id order.
    pub fn collect(tick: Tick, robots: &RobotStore) -> Vec<Self> {
        robots
            .ids()
            .filter_map(|id| robots.get(id))
            .map(|view| Self {
                tick:      tick.0,
                robot:     view.id,
                x:         view.position.x,
                y:         view.position.y,
                at_target: view.is_at_target(),
            })
            .collect()
    }
}

/// A robot's final state and energy report.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotReportRow {
    pub robot:    RobotId,
    pub final_x:  i32,
    pub final_y:  i32,
    pub target_x: i32,
    pub target_y: i32,
    pub energy:   EnergyReport,
}

impl RobotReportRow {
    pub fn collect(robots: &RobotStore) -> Vec<Self> {
        robots
            .ids()
            .filter_map(|id| {
                let view = robots.get(id)?;
                Some(Self {
                    robot:    id,
                    final_x:  view.position.x,
                    final_y:  view.position.y,
                    target_x: view.target.x,
                    target_y: view.target.y,
                    energy:   robots.energy_report(id)?,
                })
            })
            .collect()
    }
}

/// Visit count of one cell.  Only visited cells produce rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CongestionRow {
    pub x:      i32,
    pub y:      i32,
    pub visits: u32,
}

impl CongestionRow {
    /// Row-major over the grid.
    pub fn collect(grid: &Grid) -> Vec<Self> {
        grid.congested_cells()
            .map(|(cell, visits)| Self { x: cell.x, y: cell.y, visits })
            .collect()
    }
}
