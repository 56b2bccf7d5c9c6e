//! Fluent builder for constructing a [`Sim`].

use wh_core::{Cell, RobotId, SimConfig};
use wh_grid::{Grid, Planner};
use wh_robot::RobotStore;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick cap and congestion penalty
/// - [`Grid`] — the layout to simulate
/// - [`RobotStore`] — robots already spawned on `grid`
/// - `P: Planner` — the planning strategy (e.g. [`wh_grid::AStarPlanner`])
///
/// # Optional inputs
///
/// | Method         | Default                             |
/// |----------------|-------------------------------------|
/// | `.targets(v)`  | Targets already set on the store    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, grid, robots, AStarPlanner::from_config(&config))
///     .targets(stations)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: Planner> {
    config:  SimConfig,
    grid:    Grid,
    robots:  RobotStore,
    targets: Option<Vec<Cell>>,
    planner: P,
}

impl<P: Planner> SimBuilder<P> {
    pub fn new(config: SimConfig, grid: Grid, robots: RobotStore, planner: P) -> Self {
        Self { config, grid, robots, targets: None, planner }
    }

    /// Assign one target per robot, indexed by `RobotId`.
    pub fn targets(mut self, targets: Vec<Cell>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if the config is unusable or a robot stands or
    ///   aims outside the grid.
    /// - [`SimError::RobotCountMismatch`] if `targets` has the wrong length.
    pub fn build(mut self) -> SimResult<Sim<P>> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let robot_count = self.robots.len();
        if let Some(targets) = self.targets.take() {
            if targets.len() != robot_count {
                return Err(SimError::RobotCountMismatch {
                    expected: robot_count,
                    got:      targets.len(),
                    what:     "targets",
                });
            }
            for (i, target) in targets.into_iter().enumerate() {
                self.robots.set_target_position(RobotId(i as u32), target)?;
            }
        }

        for id in self.robots.ids() {
            let Some(view) = self.robots.get(id) else { continue };
            if !self.grid.is_valid_position(view.position) {
                return Err(SimError::Config(format!("{id} stands outside the grid at {}", view.position)));
            }
            if !self.grid.is_valid_position(view.target) {
                return Err(SimError::Config(format!("{id} targets {} outside the grid", view.target)));
            }
        }

        Ok(Sim::new(self.config, self.grid, self.robots, self.planner))
    }
}
