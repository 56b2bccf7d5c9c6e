//! `wh-robot` — Structure-of-Arrays robot storage for the warehouse simulator.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`store`]  | `RobotStore` (SoA arrays + occupancy index), `RobotView`    |
//! | [`energy`] | `EnergyModel`, per-robot `EnergyLedger`, `EnergyReport`     |
//! | [`error`]  | `RobotError`, `RobotResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public value types. |

pub mod energy;
pub mod error;
pub mod store;


pub use energy::{EnergyLedger, EnergyModel, EnergyReport};
pub use error::{RobotError, RobotResult};
pub use store::{RobotStore, RobotView};
