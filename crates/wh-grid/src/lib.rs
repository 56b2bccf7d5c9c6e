//! `wh-grid` — facility grid, layout generation, and path planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid` (topology + congestion map), `GridBuilder`           |
//! | [`planner`] | `Planner` trait, `PlannedPath`, `AStarPlanner`              |
//! | [`layouts`] | `sample_layout`, `random_layout`                            |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod grid;
pub mod layouts;
pub mod planner;


pub use error::{GridError, GridResult};
pub use grid::{Aisle, Grid, GridBuilder, NamedCell};
pub use layouts::{random_layout, sample_layout};
pub use planner::{AStarPlanner, PlannedPath, Planner};
