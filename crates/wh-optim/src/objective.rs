//! The layout objective: simulate a layout, return its metrics.

use wh_core::{SimConfig, SimRng};
use wh_grid::{AStarPlanner, Grid};
use wh_robot::{EnergyModel, RobotStore};
use wh_sim::{NoopObserver, RunReport, Sim, SimBuilder, SimObserver};

use crate::{Metrics, OptimError, OptimResult};

/// Something that scores a layout.  Optimizers only see this trait, so
/// tests can substitute cheap synthetic objectives.
pub trait Objective {
    /// Score `layout` without modifying it.  `rng` covers any randomized
    /// set-up the objective performs.
    fn evaluate(&self, layout: &Grid, rng: &mut SimRng) -> OptimResult<Metrics>;
}

/// A finished simulation together with its metrics.
pub struct Simulation {
    pub sim:     Sim<AStarPlanner>,
    pub report:  RunReport,
    pub metrics: Metrics,
}

/// Scores a layout by running the execution engine on it.
///
/// Each evaluation shuffles the dock and station lists, spawns
/// `robot_count` robots on the first docks, sends each to the matching
/// station, and runs until success, gridlock, or timeout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutEvaluator {
    pub robot_count:  usize,
    pub sim_config:   SimConfig,
    pub energy_model: EnergyModel,
}

impl Default for LayoutEvaluator {
    fn default() -> Self {
        Self::new(5, SimConfig::default())
    }
}

impl LayoutEvaluator {
    pub fn new(robot_count: usize, sim_config: SimConfig) -> Self {
        Self { robot_count, sim_config, energy_model: EnergyModel::default() }
    }

    /// Run one simulation on `layout` and keep the finished [`Sim`].
    pub fn simulate(&self, layout: Grid, rng: &mut SimRng) -> OptimResult<Simulation> {
        self.simulate_with(layout, rng, &mut NoopObserver)
    }

    /// Like [`simulate`](Self::simulate), reporting every tick to `observer`.
    ///
    /// # Errors
    ///
    /// [`OptimError::TooManyRobots`] if the layout has fewer docks or
    /// stations than `robot_count`; checked before any simulation work.
    pub fn simulate_with<O: SimObserver>(
        &self,
        mut layout: Grid,
        rng:        &mut SimRng,
        observer:   &mut O,
    ) -> OptimResult<Simulation> {
        let (docks, stations) = (layout.docks().len(), layout.stations().len());
        if self.robot_count > docks || self.robot_count > stations {
            return Err(OptimError::TooManyRobots { requested: self.robot_count, docks, stations });
        }

        layout.reset_congestion();
        let mut starts = layout.dock_positions();
        let mut targets = layout.station_positions();
        rng.shuffle(&mut starts);
        rng.shuffle(&mut targets);

        let mut robots = RobotStore::new(self.energy_model);
        for (&start, &target) in starts.iter().zip(&targets).take(self.robot_count) {
            let id = robots.create_and_add_robot(start, &layout)?;
            robots.set_target_position(id, target)?;
        }

        let planner = AStarPlanner::from_config(&self.sim_config);
        let mut sim = SimBuilder::new(self.sim_config.clone(), layout, robots, planner).build()?;
        let report = sim.run(observer)?;
        let metrics = Metrics::collect(&sim.robots, &sim.grid);
        tracing::trace!(status = %report.status, ticks = report.ticks, ?metrics, "layout evaluated");

        Ok(Simulation { sim, report, metrics })
    }
}

impl Objective for LayoutEvaluator {
    fn evaluate(&self, layout: &Grid, rng: &mut SimRng) -> OptimResult<Metrics> {
        Ok(self.simulate(layout.clone(), rng)?.metrics)
    }
}
