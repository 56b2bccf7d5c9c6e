//! Multi-objective simulated annealing with a Pareto archive.
//!
//! Acceptance does not weigh objectives against each other:
//!
//! | Neighbour vs. current          | Move probability   |
//! |--------------------------------|--------------------|
//! | neighbour dominates            | 1                  |
//! | neither dominates              | 0.5                |
//! | current dominates              | `exp(−1 / T)`      |
//!
//! The fixed probabilities ignore how much better or worse a neighbour is.
//! Every evaluated neighbour is offered to the archive regardless of the
//! move decision.

use wh_core::SimRng;
use wh_grid::Grid;

use crate::{AnnealSchedule, Metrics, Objective, OptimResult, ParetoArchive, neighbor_layout};

/// Probability of moving to a mutually non-dominated neighbour.
pub const NON_DOMINATED_ACCEPTANCE: f64 = 0.5;

/// One iteration of the MOSA trace.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MosaStep {
    pub iteration:    usize,
    pub temperature:  f64,
    /// Archive size after this iteration's update.
    pub archive_size: usize,
    pub moved:        bool,
}

/// Result of [`mosa`].
#[derive(Clone, Debug)]
pub struct MosaOutcome {
    pub archive:       ParetoArchive,
    pub trace:         Vec<MosaStep>,
    /// Where the search ended.
    pub final_layout:  Grid,
    pub final_metrics: Metrics,
}

/// Approximate the Pareto front of layouts reachable from `initial`.
///
/// The archive starts with the initial layout's metrics.
pub fn mosa<O: Objective + ?Sized>(
    initial:   Grid,
    objective: &O,
    schedule:  &AnnealSchedule,
    rng:       &mut SimRng,
) -> OptimResult<MosaOutcome> {
    schedule.validate()?;

    let mut current_metrics = objective.evaluate(&initial, rng)?;
    let mut current = initial;
    let mut archive = ParetoArchive::new();
    archive.update(current_metrics);

    tracing::info!(iterations = schedule.iterations, "starting multi-objective annealing");

    let mut temperature = schedule.initial_temperature;
    let mut trace = Vec::with_capacity(schedule.iterations);

    for iteration in 0..schedule.iterations {
        let candidate = neighbor_layout(&current, rng)?;
        let candidate_metrics = objective.evaluate(&candidate, rng)?;

        let moved = if candidate_metrics.dominates(&current_metrics) {
            true
        } else if !current_metrics.dominates(&candidate_metrics) {
            rng.random::<f64>() < NON_DOMINATED_ACCEPTANCE
        } else {
            rng.random::<f64>() < (-1.0 / temperature).exp()
        };
        if moved {
            current = candidate;
            current_metrics = candidate_metrics;
        }

        archive.update(candidate_metrics);
        trace.push(MosaStep { iteration, temperature, archive_size: archive.len(), moved });
        tracing::debug!(iteration, temperature, archive_size = archive.len(), moved, "mosa step");

        temperature *= schedule.cooling_rate;
    }

    tracing::info!(archive_size = archive.len(), "multi-objective annealing finished");
    Ok(MosaOutcome { archive, trace, final_layout: current, final_metrics: current_metrics })
}
