//! `wh-sim` — turn-based execution and replanning engine.
//!
//! # Tick loop
//!
//! ```text
//! reset congestion; plan every robot not at its target
//! until success, gridlock, or max_ticks:
//!   for robot in ascending RobotId order:
//!     ① Plan    — empty queue and not at target → ask the planner
//!     ② Move    — try the front command
//!                   refused  → charge blocked attempt, mark for replan
//!                   accepted → pop, record congestion; revisited cell →
//!                              charge penalty, mark for replan
//!   ③ Replan  — clear and regenerate every marked robot's queue
//! ```
//!
//! # Termination
//!
//! | Status     | Condition                                                  |
//! |------------|------------------------------------------------------------|
//! | `Success`  | every robot on target, no queued commands                  |
//! | `Gridlock` | a tick with no moves and no replans while work remains     |
//! | `Timeout`  | `max_ticks` ticks executed                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::SimConfig;
//! use wh_grid::{AStarPlanner, sample_layout};
//! use wh_robot::RobotStore;
//! use wh_sim::{NoopObserver, SimBuilder};
//!
//! let grid = sample_layout()?;
//! let mut robots = RobotStore::default();
//! let id = robots.create_and_add_robot(grid.dock_positions()[0], &grid)?;
//! robots.set_target_position(id, grid.station_positions()[0])?;
//! let mut sim = SimBuilder::new(SimConfig::default(), grid, robots, AStarPlanner::default())
//!     .build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod commands;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use commands::CommandQueue;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunReport, RunStatus, Sim, TickStats};
