//! Grid coordinates and the four movement directions.
//!
//! Coordinates are signed so that stepping off the west or north edge yields
//! a representable (but out-of-bounds) cell instead of wrapping.  `y` grows
//! downward: [`Direction::Up`] decrements `y`.

use std::fmt;

/// An integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance; the A* heuristic on a 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The cell one step away in `dir`.  May be out of bounds.
    #[inline]
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours in planner expansion order.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        Direction::EXPANSION_ORDER.into_iter().map(move |d| self.step(d))
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// A unit move on the grid.  Robots consume one per tick from their command
/// queue.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour expansion order used by the planner: down, up, right, left.
    /// Part of the tie-breaking contract, so tests may rely on it.
    pub const EXPANSION_ORDER: [Direction; 4] =
        [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

    /// `(dx, dy)` offset of this direction.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction that leads from `from` to the orthogonally adjacent `to`.
    ///
    /// Returns `None` if the cells are equal or not adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0)  => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1)  => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            _       => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}
