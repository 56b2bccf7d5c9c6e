//! Optimizer configuration: cost weights and the annealing schedule.

use crate::{Metrics, OptimError, OptimResult};

// ── CostWeights ───────────────────────────────────────────────────────────────

/// Weights that fold [`Metrics`] into the scalar cost minimized by
/// simulated annealing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostWeights {
    pub distance:   f64,
    pub congestion: f64,
    pub energy:     f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self { distance: 0.5, congestion: 0.3, energy: 0.2 }
    }
}

impl CostWeights {
    pub fn cost(&self, m: &Metrics) -> f64 {
        self.distance * m.total_distance as f64
            + self.congestion * f64::from(m.max_congestion)
            + self.energy * m.total_energy
    }
}

// ── AnnealSchedule ────────────────────────────────────────────────────────────

/// Geometric cooling schedule shared by both annealers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealSchedule {
    /// Starting temperature.  Default: 1000.
    pub initial_temperature: f64,
    /// Multiplier applied after every iteration, in `(0, 1)`.  Default: 0.95.
    pub cooling_rate:        f64,
    /// Neighbour evaluations to perform.  Default: 100.
    pub iterations:          usize,
}

impl Default for AnnealSchedule {
    fn default() -> Self {
        Self { initial_temperature: 1000.0, cooling_rate: 0.95, iterations: 100 }
    }
}

impl AnnealSchedule {
    pub fn validate(&self) -> OptimResult<()> {
        let t = self.initial_temperature;
        let temperature_ok = t.is_finite() && t > 0.0;
        if !temperature_ok {
            return Err(OptimError::Config(format!(
                "initial_temperature must be positive and finite, got {t}"
            )));
        }
        let rate_ok = self.cooling_rate > 0.0 && self.cooling_rate < 1.0;
        if !rate_ok {
            return Err(OptimError::Config(format!(
                "cooling_rate must lie in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }

    /// Temperature before iteration `i` (0-based).
    pub fn temperature_at(&self, i: usize) -> f64 {
        self.initial_temperature * self.cooling_rate.powi(i as i32)
    }
}
