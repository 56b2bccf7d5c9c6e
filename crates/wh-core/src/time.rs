//! Simulation tick counter and engine configuration.
//!
//! Time is a monotonically increasing `Tick`.  One tick advances every robot
//! by at most one cell; there is no mapping to wall-clock time because the
//! model is turn-based, not kinematic.

use std::fmt;

use crate::{WhError, WhResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Execution-engine configuration shared by the planner, the engine, and the
/// layout objective.
///
/// Typically embedded in the application's TOML config and passed down.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Hard cap on ticks per run.  A run that has not finished by then stops
    /// with a timeout status and reports partial progress.  Default: 50.
    pub max_ticks: u64,

    /// Congestion penalty multiplier.  The planner adds
    /// `congestion × congestion_penalty` to each step's cost and the engine
    /// charges `congestion_penalty × (congestion − 1)` energy when a robot
    /// enters a cell visited more than once.  Default: 1.
    pub congestion_penalty: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks:          50,
            congestion_penalty: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which a run times out (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Reject configurations that could never make progress.
    pub fn validate(&self) -> WhResult<()> {
        if self.max_ticks == 0 {
            return Err(WhError::Config("max_ticks must be at least 1".into()));
        }
        Ok(())
    }
}
