//! Layout metrics and Pareto domination.

use wh_grid::Grid;
use wh_robot::RobotStore;

/// Outcome of one full simulation run.  Every objective is minimized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Successful moves summed over all robots.
    pub total_distance: u64,
    /// Highest visit count on any cell; 0 if nobody moved.
    pub max_congestion: u32,
    /// Energy spent summed over all robots, congestion surcharges included.
    pub total_energy:   f64,
}

impl Metrics {
    /// Collect metrics from a finished run.
    pub fn collect(robots: &RobotStore, grid: &Grid) -> Self {
        Self {
            total_distance: robots.total_successful_moves(),
            max_congestion: grid.max_congestion(),
            total_energy:   robots.total_energy(),
        }
    }

    /// `true` if `self` is no worse than `other` in every objective and
    /// strictly better in at least one.
    pub fn dominates(&self, other: &Metrics) -> bool {
        let no_worse = self.total_distance <= other.total_distance
            && self.max_congestion <= other.max_congestion
            && self.total_energy <= other.total_energy;
        let better = self.total_distance < other.total_distance
            || self.max_congestion < other.max_congestion
            || self.total_energy < other.total_energy;
        no_worse && better
    }
}
