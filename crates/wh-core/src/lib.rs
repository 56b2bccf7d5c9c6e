//! `wh-core` — foundational types for the warehouse layout simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It intentionally
//! has no `wh-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`ids`]   | `RobotId`                                               |
//! | [`cell`]  | `Cell`, `Direction`, Manhattan distance                 |
//! | [`time`]  | `Tick`, `SimConfig`                                     |
//! | [`rng`]   | `SimRng` (the single injectable randomness source)      |
//! | [`error`] | `WhError`, `WhResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Direction};
pub use error::{WhError, WhResult};
pub use ids::RobotId;
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
