//! Strongly typed robot identifier.
//!
//! `RobotId` is `Copy + Ord + Hash` so it can key maps and sort without
//! ceremony.  The inner integer is `pub` so stores can index their parallel
//! `Vec`s directly, but callers should prefer [`RobotId::index`].

use std::fmt;

/// Index of a robot in `RobotStore`.
///
/// Ids are assigned in spawn order, which is also the fixed per-tick
/// iteration order of the execution engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotId(pub u32);

impl RobotId {
    /// Sentinel meaning "no robot" (`u32::MAX`).
    pub const INVALID: RobotId = RobotId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for RobotId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROBOT_{:03}", self.0)
    }
}
