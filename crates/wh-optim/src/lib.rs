//! `wh-optim` — layout objective and layout optimizers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`metrics`]   | `Metrics`, Pareto domination                              |
//! | [`config`]    | `CostWeights`, `AnnealSchedule`                           |
//! | [`objective`] | `Objective` trait, `LayoutEvaluator`, `Simulation`        |
//! | [`neighbor`]  | `neighbor_layout` (one storage/aisle swap)                |
//! | [`anneal`]    | `simulated_annealing`, `AnnealOutcome`, `AnnealStep`      |
//! | [`pareto`]    | `ParetoArchive`                                           |
//! | [`mosa`]      | `mosa`, `MosaOutcome`, `MosaStep`                         |
//! | [`error`]     | `OptimError`, `OptimResult<T>`                            |
//!
//! Every candidate layout is an independent `Grid` value: the optimizers
//! clone, never mutate in place, so evaluating a neighbour cannot disturb
//! the current or best layout.  All randomness comes from the caller's
//! `SimRng`.

pub mod anneal;
pub mod config;
pub mod error;
pub mod metrics;
pub mod mosa;
pub mod neighbor;
pub mod objective;
pub mod pareto;

#[cfg(test)]
mod tests;

pub use anneal::{AnnealOutcome, AnnealStep, simulated_annealing};
pub use config::{AnnealSchedule, CostWeights};
pub use error::{OptimError, OptimResult};
pub use metrics::Metrics;
pub use mosa::{MosaOutcome, MosaStep, NON_DOMINATED_ACCEPTANCE, mosa};
pub use neighbor::neighbor_layout;
pub use objective::{LayoutEvaluator, Objective, Simulation};
pub use pareto::ParetoArchive;
