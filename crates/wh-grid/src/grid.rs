//! Facility grid representation and builder.
//!
//! # Data layout
//!
//! Per-cell state lives in dense row-major arrays indexed by
//! `y * width + x`, so legality checks on the planner's inner loop are a
//! bounds check plus two array reads.  Named features (docks, stations,
//! aisle segments) are kept as small lists alongside for enumeration and
//! for the optimizer's swap move.
//!
//! # Traversability
//!
//! A cell is traversable iff it is an aisle, dock, or station cell and is
//! not blocked.  Docks and stations are exempt from the blocked check even
//! if a caller registers them as storage, so infrastructure can never be
//! walled off.
//!
//! # Congestion
//!
//! The congestion map counts successful moves onto each cell during the
//! current run.  It is the only part of a `Grid` that changes while a
//! simulation runs; [`Grid::reset_congestion`] zeroes it between runs.

use wh_core::Cell;

use crate::{GridError, GridResult};

// ── Named features ────────────────────────────────────────────────────────────

/// A dock or packing station: one named cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedCell {
    pub name:     String,
    pub position: Cell,
}

/// A named run of traversable cells.
///
/// Built from a straight segment; after optimizer swaps the run may no longer
/// be contiguous, but each cell is still listed exactly once per aisle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aisle {
    pub name:  String,
    pub cells: Vec<Cell>,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Static facility topology plus the per-run congestion map.
///
/// `Clone` is a full deep copy; the optimizer relies on this to give every
/// candidate layout its own independent congestion state.  Construct with
/// [`GridBuilder`].
#[derive(Clone, Debug)]
pub struct Grid {
    width:  i32,
    height: i32,

    /// Storage / shelving.  Ignored for docks and stations.
    blocked: Vec<bool>,

    /// Number of aisle segments listing each cell.  `> 0` means "aisle".
    aisle_refs: Vec<u16>,

    /// `true` for dock and station cells.
    infrastructure: Vec<bool>,

    /// Successful moves onto each cell during the current run.
    congestion: Vec<u32>,

    docks:    Vec<NamedCell>,
    stations: Vec<NamedCell>,
    aisles:   Vec<Aisle>,
}

impl Grid {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        if self.is_valid_position(cell) {
            Some((cell.y * self.width + cell.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn cell_at(&self, index: usize) -> Cell {
        let i = index as i32;
        Cell::new(i % self.width, i / self.width)
    }

    fn checked_index(&self, cell: Cell) -> GridResult<usize> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            cell,
            width:  self.width,
            height: self.height,
        })
    }

    // ── Topology queries ──────────────────────────────────────────────────

    /// `true` if `cell` lies inside the grid bounds.
    #[inline]
    pub fn is_valid_position(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// `true` if `cell` holds storage.  Docks, stations, and out-of-bounds
    /// cells are never blocked.
    #[inline]
    pub fn is_blocked_position(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|i| self.blocked[i] && !self.infrastructure[i])
    }

    /// `true` if `cell` is part of an aisle, a dock, or a station.
    #[inline]
    pub fn is_position_in_aisle(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|i| self.aisle_refs[i] > 0 || self.infrastructure[i])
    }

    /// `true` if `cell` is a dock or station.
    #[inline]
    pub fn is_infrastructure(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.infrastructure[i])
    }

    /// `true` if a robot may stand on `cell` (ignoring other robots).
    #[inline]
    pub fn is_traversable(&self, cell: Cell) -> bool {
        self.is_position_in_aisle(cell) && !self.is_blocked_position(cell)
    }

    pub fn docks(&self) -> &[NamedCell] {
        &self.docks
    }

    pub fn stations(&self) -> &[NamedCell] {
        &self.stations
    }

    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    pub fn dock_positions(&self) -> Vec<Cell> {
        self.docks.iter().map(|d| d.position).collect()
    }

    pub fn station_positions(&self) -> Vec<Cell> {
        self.stations.iter().map(|s| s.position).collect()
    }

    /// All storage cells in row-major order (infrastructure excluded).
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.blocked.len())
            .filter(|&i| self.blocked[i] && !self.infrastructure[i])
            .map(|i| self.cell_at(i))
    }

    // ── Topology mutation ─────────────────────────────────────────────────

    /// Mark `cell` as storage.  Has no effect on traversal of docks/stations.
    pub fn add_blocked_position(&mut self, cell: Cell) -> GridResult<()> {
        let i = self.checked_index(cell)?;
        self.blocked[i] = true;
        Ok(())
    }

    /// Clear storage from `cell`.  Returns `true` if it was blocked.
    pub fn remove_blocked_position(&mut self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => std::mem::replace(&mut self.blocked[i], false),
            None => false,
        }
    }

    /// Storage cells the optimizer may turn into aisle, row-major.
    pub fn swappable_storage(&self) -> Vec<Cell> {
        self.blocked_cells().collect()
    }

    /// Distinct aisle cells the optimizer may turn into storage, row-major.
    pub fn swappable_aisle_cells(&self) -> Vec<Cell> {
        (0..self.aisle_refs.len())
            .filter(|&i| self.aisle_refs[i] > 0 && !self.infrastructure[i] && !self.blocked[i])
            .map(|i| self.cell_at(i))
            .collect()
    }

    /// Turn storage cell `storage` into aisle and aisle cell `aisle_cell`
    /// into storage, as one atomic layout move.
    ///
    /// The first aisle listing `aisle_cell` gets `storage` in its place; the
    /// cell is dropped from every other aisle so it can no longer count as
    /// traversable.  Nothing is modified if either cell is ineligible.
    pub fn swap_storage_with_aisle(&mut self, storage: Cell, aisle_cell: Cell) -> GridResult<()> {
        let s = self.checked_index(storage)?;
        let a = self.checked_index(aisle_cell)?;

        if self.infrastructure[s] || self.infrastructure[a] {
            let cell = if self.infrastructure[s] { storage } else { aisle_cell };
            return Err(GridError::NotSwappable { cell, reason: "docks and stations are fixed" });
        }
        if !self.blocked[s] {
            return Err(GridError::NotSwappable { cell: storage, reason: "not a storage cell" });
        }
        if self.aisle_refs[a] == 0 || self.blocked[a] {
            return Err(GridError::NotSwappable { cell: aisle_cell, reason: "not an open aisle cell" });
        }

        self.blocked[s] = false;
        self.blocked[a] = true;

        let mut replaced = false;
        for aisle in &mut self.aisles {
            let Some(pos) = aisle.cells.iter().position(|&c| c == aisle_cell) else { continue };
            // Storage placed on an aisle by `add_blocked` may already be listed.
            if !replaced && !aisle.cells.contains(&storage) {
                aisle.cells[pos] = storage;
                self.aisle_refs[s] += 1;
            }
            aisle.cells.retain(|&c| c != aisle_cell);
            replaced = true;
        }
        self.aisle_refs[a] = 0;
        Ok(())
    }

    // ── Congestion map ────────────────────────────────────────────────────

    /// Count one visit to `cell` and return its new congestion level.
    /// Out-of-bounds cells are ignored (level 0).
    pub fn record_congestion(&mut self, cell: Cell) -> u32 {
        match self.index(cell) {
            Some(i) => {
                self.congestion[i] += 1;
                self.congestion[i]
            }
            None => 0,
        }
    }

    /// Visits recorded on `cell` this run (0 for out-of-bounds cells).
    #[inline]
    pub fn get_congestion(&self, cell: Cell) -> u32 {
        self.index(cell).map_or(0, |i| self.congestion[i])
    }

    /// Zero the congestion map.
    pub fn reset_congestion(&mut self) {
        self.congestion.fill(0);
    }

    /// Highest visit count on any cell (0 if no moves were recorded).
    pub fn max_congestion(&self) -> u32 {
        self.congestion.iter().copied().max().unwrap_or(0)
    }

    /// Every visited cell with its count, row-major.
    pub fn congested_cells(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.congestion
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, &n)| (self.cell_at(i), n))
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Grid`] incrementally, then call [`build`](Self::build).
///
/// Features may be added in any order.  `build()` rasterizes aisle segments
/// and validates bounds, segment shape, and name uniqueness.
///
/// # Example
///
/// ```
/// use wh_core::Cell;
/// use wh_grid::GridBuilder;
///
/// let mut b = GridBuilder::new(5, 5);
/// b.add_aisle("SPINE", Cell::new(2, 0), Cell::new(2, 4))
///     .add_dock("DOCK_A", Cell::new(2, 4))
///     .add_station("PACK_1", Cell::new(2, 0))
///     .add_blocked(Cell::new(0, 0));
/// let grid = b.build().unwrap();
/// assert!(grid.is_traversable(Cell::new(2, 2)));
/// assert!(grid.is_blocked_position(Cell::new(0, 0)));
/// ```
pub struct GridBuilder {
    width:    i32,
    height:   i32,
    docks:    Vec<NamedCell>,
    stations: Vec<NamedCell>,
    aisles:   Vec<RawAisle>,
    blocked:  Vec<Cell>,
}

struct RawAisle {
    name: String,
    from: Cell,
    to:   Cell,
}

impl GridBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            docks:    Vec::new(),
            stations: Vec::new(),
            aisles:   Vec::new(),
            blocked:  Vec::new(),
        }
    }

    /// Add an entry dock (robot spawn point).
    pub fn add_dock(&mut self, name: impl Into<String>, position: Cell) -> &mut Self {
        self.docks.push(NamedCell { name: name.into(), position });
        self
    }

    /// Add a packing station (robot delivery point).
    pub fn add_station(&mut self, name: impl Into<String>, position: Cell) -> &mut Self {
        self.stations.push(NamedCell { name: name.into(), position });
        self
    }

    /// Add a straight aisle segment from `from` to `to`, both inclusive.
    pub fn add_aisle(&mut self, name: impl Into<String>, from: Cell, to: Cell) -> &mut Self {
        self.aisles.push(RawAisle { name: name.into(), from, to });
        self
    }

    /// Mark a single cell as storage.
    pub fn add_blocked(&mut self, cell: Cell) -> &mut Self {
        self.blocked.push(cell);
        self
    }

    /// Mark every cell of the inclusive rectangle `[x0, x1] × [y0, y1]` as
    /// storage.
    pub fn add_storage_block(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> &mut Self {
        for x in x0..=x1 {
            for y in y0..=y1 {
                self.blocked.push(Cell::new(x, y));
            }
        }
        self
    }

    /// Consume the builder and produce a [`Grid`].
    pub fn build(self) -> GridResult<Grid> {
        // Cell indices are computed in i32, so the cell count must fit there.
        let area = match self.width.checked_mul(self.height) {
            Some(area) if self.width > 0 && self.height > 0 => area,
            _ => return Err(GridError::InvalidDimensions { width: self.width, height: self.height }),
        };

        let n = area as usize;
        let mut grid = Grid {
            width:          self.width,
            height:         self.height,
            blocked:        vec![false; n],
            aisle_refs:     vec![0; n],
            infrastructure: vec![false; n],
            congestion:     vec![0; n],
            docks:          Vec::with_capacity(self.docks.len()),
            stations:       Vec::with_capacity(self.stations.len()),
            aisles:         Vec::with_capacity(self.aisles.len()),
        };

        let mut names = rustc_hash::FxHashSet::default();
        let mut claim = |name: &str| {
            if names.insert(name.to_owned()) {
                Ok(())
            } else {
                Err(GridError::DuplicateName(name.to_owned()))
            }
        };

        for dock in self.docks {
            claim(&dock.name)?;
            let i = grid.checked_index(dock.position)?;
            grid.infrastructure[i] = true;
            grid.docks.push(dock);
        }
        for station in self.stations {
            claim(&station.name)?;
            let i = grid.checked_index(station.position)?;
            grid.infrastructure[i] = true;
            grid.stations.push(station);
        }
        for raw in self.aisles {
            claim(&raw.name)?;
            let cells = rasterize(&raw)?;
            for &c in &cells {
                let i = grid.checked_index(c)?;
                grid.aisle_refs[i] += 1;
            }
            grid.aisles.push(Aisle { name: raw.name, cells });
        }
        for cell in self.blocked {
            grid.add_blocked_position(cell)?;
        }

        Ok(grid)
    }
}

/// Cells of a straight segment, walking from `from` to `to`.
fn rasterize(raw: &RawAisle) -> GridResult<Vec<Cell>> {
    let (from, to) = (raw.from, raw.to);
    if from.x != to.x && from.y != to.y {
        return Err(GridError::NotStraight { name: raw.name.clone(), from, to });
    }
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    let len = from.manhattan(to) as i32;
    Ok((0..=len).map(|k| Cell::new(from.x + dx * k, from.y + dy * k)).collect())
}
