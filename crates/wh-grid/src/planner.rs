//! Planning trait and the default congestion-aware A* implementation.
//!
//! # Pluggability
//!
//! `wh-sim` calls planning via the [`Planner`] trait, so applications can
//! swap in other strategies (reservation tables, cooperative A*) without
//! touching the execution engine.
//!
//! # Cost model
//!
//! Each step costs `1 + congestion(dest) × congestion_penalty`.  Congestion
//! only enters the g-score; the Manhattan heuristic stays admissible and
//! consistent because every step costs at least 1.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use wh_core::{Cell, Direction, RobotId, SimConfig};

use crate::grid::Grid;

// ── PlannedPath ───────────────────────────────────────────────────────────────

/// The result of a planning query: cells from start to goal inclusive and
/// the accumulated cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPath {
    pub cells: Vec<Cell>,
    /// Steps plus congestion surcharges.
    pub cost: u32,
}

impl PlannedPath {
    /// Number of moves needed to follow the path.
    pub fn move_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// `true` if start and goal coincide.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    /// Direction tokens that walk the path, one per consecutive cell pair.
    pub fn directions(&self) -> Vec<Direction> {
        self.cells
            .windows(2)
            .filter_map(|w| Direction::between(w[0], w[1]))
            .collect()
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable single-robot planner.
///
/// `positions` is a snapshot of every robot's current cell indexed by
/// `RobotId`; the entry for `robot` itself is ignored.  It is a one-tick
/// collision prediction, not multi-step coordination.
///
/// Implementations must be `Send + Sync` so independent layout evaluations
/// could share one planner across threads.
pub trait Planner: Send + Sync {
    /// Plan from `start` to `goal`.
    ///
    /// Returns `None` if no path exists.  Callers treat that as "wait and
    /// retry later", never as a fatal error.
    fn plan(
        &self,
        grid:      &Grid,
        start:     Cell,
        goal:      Cell,
        robot:     RobotId,
        positions: &[Cell],
    ) -> Option<PlannedPath>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over 4-connected moves with a dynamic congestion surcharge.
///
/// Neighbour legality, in order:
///
/// | Check                              | Goal exempt? |
/// |------------------------------------|--------------|
/// | inside grid bounds                 | no           |
/// | not already expanded               | no           |
/// | not storage                        | yes          |
/// | not occupied by another robot      | no           |
/// | aisle, dock, or station            | yes          |
///
/// Heap ties are broken by insertion order so results are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AStarPlanner {
    pub congestion_penalty: u32,
}

impl Default for AStarPlanner {
    fn default() -> Self {
        Self { congestion_penalty: 1 }
    }
}

impl AStarPlanner {
    pub fn new(congestion_penalty: u32) -> Self {
        Self { congestion_penalty }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.congestion_penalty)
    }

    #[inline]
    fn step_cost(&self, grid: &Grid, cell: Cell) -> u32 {
        1u32.saturating_add(grid.get_congestion(cell).saturating_mul(self.congestion_penalty))
    }
}

impl Planner for AStarPlanner {
    fn plan(
        &self,
        grid:      &Grid,
        start:     Cell,
        goal:      Cell,
        robot:     RobotId,
        positions: &[Cell],
    ) -> Option<PlannedPath> {
        astar(self, grid, start, goal, robot, positions)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

#[inline]
fn slot(grid: &Grid, cell: Cell) -> usize {
    (cell.y * grid.width() + cell.x) as usize
}

fn astar(
    planner:   &AStarPlanner,
    grid:      &Grid,
    start:     Cell,
    goal:      Cell,
    robot:     RobotId,
    positions: &[Cell],
) -> Option<PlannedPath> {
    if !grid.is_valid_position(start) || !grid.is_valid_position(goal) {
        return None;
    }
    if start == goal {
        return Some(PlannedPath { cells: vec![start], cost: 0 });
    }

    let others: FxHashSet<Cell> = positions
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != robot.index())
        .map(|(_, &c)| c)
        .collect();

    let n = grid.cell_count();
    // g[v] = best known cost to reach v.
    let mut g         = vec![u32::MAX; n];
    // came_from[v] = predecessor on the best known path; None for unreached.
    let mut came_from = vec![None::<Cell>; n];
    let mut closed    = vec![false; n];

    g[slot(grid, start)] = 0;

    // Min-heap on (f, seq).  `seq` is a push counter: equal f-scores pop in
    // insertion order.
    let mut heap: BinaryHeap<Reverse<(u32, u64, Cell)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    heap.push(Reverse((start.manhattan(goal), seq, start)));

    let mut expanded = 0usize;
    while let Some(Reverse((_, _, current))) = heap.pop() {
        let cur = slot(grid, current);
        if closed[cur] {
            continue;
        }
        if current == goal {
            tracing::trace!(robot = %robot, %start, %goal, expanded, cost = g[cur], "a* reached goal");
            return Some(reconstruct(grid, &came_from, goal, g[cur]));
        }
        closed[cur] = true;
        expanded += 1;

        for neighbor in current.neighbors() {
            if !grid.is_valid_position(neighbor) {
                continue;
            }
            let nb = slot(grid, neighbor);
            if closed[nb] {
                continue;
            }
            let is_goal = neighbor == goal;
            if grid.is_blocked_position(neighbor) && !is_goal {
                continue;
            }
            if others.contains(&neighbor) {
                continue;
            }
            if !grid.is_position_in_aisle(neighbor) && !is_goal {
                continue;
            }

            let tentative = g[cur].saturating_add(planner.step_cost(grid, neighbor));
            if tentative < g[nb] {
                g[nb] = tentative;
                came_from[nb] = Some(current);
                seq += 1;
                heap.push(Reverse((tentative.saturating_add(neighbor.manhattan(goal)), seq, neighbor)));
            }
        }
    }

    tracing::trace!(robot = %robot, %start, %goal, expanded, "a* exhausted open set");
    None
}

fn reconstruct(grid: &Grid, came_from: &[Option<Cell>], goal: Cell, cost: u32) -> PlannedPath {
    let mut cells = vec![goal];
    let mut cur = goal;
    while let Some(prev) = came_from[slot(grid, cur)] {
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    PlannedPath { cells, cost }
}
