//! Core robot storage: `RobotStore` (SoA data plus an occupancy index).
//!
//! Every `Vec` field has one element per robot and the `RobotId` value is the
//! index into all of them.  Ids are handed out in spawn order and never
//! reused, so the engine's "ascending id" iteration order is also spawn
//! order.
//!
//! # Occupancy
//!
//! `occupancy` maps each occupied cell to the robot standing on it.  It is
//! updated on every successful move, which lets [`RobotStore::try_move`]
//! check "occupied by another robot" in O(1) against live positions rather
//! than a start-of-tick snapshot.

use rustc_hash::FxHashMap;
use wh_core::{Cell, Direction, RobotId};
use wh_grid::Grid;

use crate::{EnergyLedger, EnergyModel, EnergyReport, RobotError, RobotResult};

// ── RobotView ─────────────────────────────────────────────────────────────────

/// Borrowed read-only view of one robot, returned by [`RobotStore::get`].
#[derive(Clone, Copy, Debug)]
pub struct RobotView<'a> {
    pub id:       RobotId,
    pub position: Cell,
    pub target:   Cell,
    /// Every cell visited, starting with the spawn cell.
    pub history:  &'a [Cell],
    pub energy:   &'a EnergyLedger,
}

impl RobotView<'_> {
    pub fn is_at_target(&self) -> bool {
        self.position == self.target
    }
}

// ── RobotStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all robot state.
#[derive(Clone, Debug, Default)]
pub struct RobotStore {
    energy_model: EnergyModel,

    positions: Vec<Cell>,
    /// Defaults to the spawn cell until a target is assigned.
    targets:   Vec<Cell>,
    histories: Vec<Vec<Cell>>,
    ledgers:   Vec<EnergyLedger>,

    occupancy: FxHashMap<Cell, RobotId>,
}

impl RobotStore {
    pub fn new(energy_model: EnergyModel) -> Self {
        Self { energy_model, ..Self::default() }
    }

    pub fn energy_model(&self) -> &EnergyModel {
        &self.energy_model
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterator over all `RobotId`s in ascending index order.
    pub fn ids(&self) -> impl Iterator<Item = RobotId> + '_ {
        (0..self.positions.len() as u32).map(RobotId)
    }

    #[inline]
    fn slot(&self, id: RobotId) -> RobotResult<usize> {
        let i = id.index();
        if i < self.positions.len() { Ok(i) } else { Err(RobotError::NotFound(id)) }
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Spawn a robot at `start` with its target set to `start`.
    ///
    /// # Errors
    ///
    /// - [`RobotError::OutOfBounds`] if `start` is outside `grid`.
    /// - [`RobotError::Occupied`] if another robot already stands on `start`.
    pub fn create_and_add_robot(&mut self, start: Cell, grid: &Grid) -> RobotResult<RobotId> {
        if !grid.is_valid_position(start) {
            return Err(RobotError::OutOfBounds(start));
        }
        if let Some(&by) = self.occupancy.get(&start) {
            return Err(RobotError::Occupied { cell: start, by });
        }

        let id = RobotId(self.positions.len() as u32);
        self.positions.push(start);
        self.targets.push(start);
        self.histories.push(vec![start]);
        self.ledgers.push(EnergyLedger::default());
        self.occupancy.insert(start, id);
        Ok(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn get(&self, id: RobotId) -> Option<RobotView<'_>> {
        let i = self.slot(id).ok()?;
        Some(RobotView {
            id,
            position: self.positions[i],
            target:   self.targets[i],
            history:  &self.histories[i],
            energy:   &self.ledgers[i],
        })
    }

    /// Current cell of every robot, indexed by `RobotId`.  This is the
    /// snapshot handed to planners.
    pub fn positions(&self) -> &[Cell] {
        &self.positions
    }

    pub fn position(&self, id: RobotId) -> Option<Cell> {
        self.positions.get(id.index()).copied()
    }

    pub fn target(&self, id: RobotId) -> Option<Cell> {
        self.targets.get(id.index()).copied()
    }

    /// Robot standing on `cell`, if any.
    pub fn occupant(&self, cell: Cell) -> Option<RobotId> {
        self.occupancy.get(&cell).copied()
    }

    /// `false` for unknown ids.
    pub fn is_at_target(&self, id: RobotId) -> bool {
        self.get(id).is_some_and(|r| r.is_at_target())
    }

    /// `true` once every robot stands on its target.
    pub fn all_at_target(&self) -> bool {
        self.positions.iter().zip(&self.targets).all(|(p, t)| p == t)
    }

    /// Manhattan distance from the current cell to the target.
    pub fn distance_to_target(&self, id: RobotId) -> Option<u32> {
        let i = self.slot(id).ok()?;
        Some(self.positions[i].manhattan(self.targets[i]))
    }

    pub fn history(&self, id: RobotId) -> Option<&[Cell]> {
        self.histories.get(id.index()).map(Vec::as_slice)
    }

    pub fn ledger(&self, id: RobotId) -> Option<&EnergyLedger> {
        self.ledgers.get(id.index())
    }

    pub fn energy_report(&self, id: RobotId) -> Option<EnergyReport> {
        let i = self.slot(id).ok()?;
        let ledger = &self.ledgers[i];
        Some(EnergyReport {
            total_energy_spent:       ledger.total_energy_spent,
            successful_moves:         ledger.successful_moves,
            blocked_attempts:         ledger.blocked_attempts,
            total_attempts:           ledger.total_attempts(),
            energy_efficiency:        ledger.energy_efficiency(),
            distance_to_target:       self.positions[i].manhattan(self.targets[i]),
            path_length:              self.histories[i].len() - 1,
            total_congestion_penalty: ledger.total_congestion_penalty,
        })
    }

    /// Sum of successful moves across all robots.
    pub fn total_successful_moves(&self) -> u64 {
        self.ledgers.iter().map(|l| u64::from(l.successful_moves)).sum()
    }

    /// Sum of energy spent across all robots.
    pub fn total_energy(&self) -> f64 {
        self.ledgers.iter().map(|l| l.total_energy_spent).sum()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub fn set_target_position(&mut self, id: RobotId, target: Cell) -> RobotResult<()> {
        let i = self.slot(id)?;
        self.targets[i] = target;
        Ok(())
    }

    /// Charge a congestion surcharge to energy and the penalty counter in
    /// one update.
    pub fn add_congestion_penalty(&mut self, id: RobotId, penalty: f64) -> RobotResult<()> {
        let i = self.slot(id)?;
        self.ledgers[i].charge_congestion(penalty);
        Ok(())
    }

    /// Restart the movement history at the current cell.
    pub fn clear_movement_history(&mut self, id: RobotId) -> RobotResult<()> {
        let i = self.slot(id)?;
        let here = self.positions[i];
        self.histories[i].clear();
        self.histories[i].push(here);
        Ok(())
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// `true` if robot `id` could step onto `dest` right now.
    ///
    /// `dest` must be in bounds, not storage, part of an aisle (or a dock or
    /// station), and not occupied by a different robot.
    pub fn can_enter(&self, id: RobotId, dest: Cell, grid: &Grid) -> bool {
        grid.is_valid_position(dest)
            && self.occupancy.get(&dest).is_none_or(|&other| other == id)
            && !grid.is_blocked_position(dest)
            && grid.is_position_in_aisle(dest)
    }

    /// Attempt one step in `dir`.
    ///
    /// On success the position, history, and occupancy index are updated and
    /// a move is charged.  On failure a blocked attempt is charged and the
    /// robot stays put.  Unknown ids return `false` without charging.
    pub fn try_move(&mut self, id: RobotId, dir: Direction, grid: &Grid) -> bool {
        let Ok(i) = self.slot(id) else {
            return false;
        };
        let from = self.positions[i];
        let dest = from.step(dir);

        if !self.can_enter(id, dest, grid) {
            self.ledgers[i].charge_blocked(&self.energy_model);
            tracing::trace!(robot = %id, from = %from, to = %dest, "move blocked");
            return false;
        }

        self.occupancy.remove(&from);
        self.occupancy.insert(dest, id);
        self.positions[i] = dest;
        self.histories[i].push(dest);
        self.ledgers[i].charge_move(&self.energy_model);
        tracing::trace!(robot = %id, from = %from, to = %dest, "moved");
        true
    }

    pub fn move_up(&mut self, id: RobotId, grid: &Grid) -> bool {
        self.try_move(id, Direction::Up, grid)
    }

    pub fn move_down(&mut self, id: RobotId, grid: &Grid) -> bool {
        self.try_move(id, Direction::Down, grid)
    }

    pub fn move_left(&mut self, id: RobotId, grid: &Grid) -> bool {
        self.try_move(id, Direction::Left, grid)
    }

    pub fn move_right(&mut self, id: RobotId, grid: &Grid) -> bool {
        self.try_move(id, Direction::Right, grid)
    }
}
