//! Single-objective simulated annealing over layouts.

use wh_core::SimRng;
use wh_grid::Grid;

use crate::{AnnealSchedule, CostWeights, Metrics, Objective, OptimResult, neighbor_layout};

/// One iteration of the annealing trace.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealStep {
    pub iteration:      usize,
    /// Temperature used for this iteration's acceptance test.
    pub temperature:    f64,
    /// Cost of the current layout after the acceptance decision.
    pub current_cost:   f64,
    pub candidate_cost: f64,
    pub best_cost:      f64,
    pub accepted:       bool,
}

/// Result of [`simulated_annealing`].
#[derive(Clone, Debug)]
pub struct AnnealOutcome {
    pub best_layout:  Grid,
    pub best_metrics: Metrics,
    pub best_cost:    f64,
    pub initial_cost: f64,
    pub trace:        Vec<AnnealStep>,
}

/// Minimize `weights.cost(metrics)` starting from `initial`.
///
/// Each iteration evaluates one neighbour of the current layout.  A cheaper
/// neighbour is always accepted; a costlier one with probability
/// `exp(−Δ / T)`.  The temperature is multiplied by the cooling rate after
/// every iteration.
pub fn simulated_annealing<O: Objective + ?Sized>(
    initial:   Grid,
    objective: &O,
    weights:   &CostWeights,
    schedule:  &AnnealSchedule,
    rng:       &mut SimRng,
) -> OptimResult<AnnealOutcome> {
    schedule.validate()?;

    let mut current_metrics = objective.evaluate(&initial, rng)?;
    let mut current_cost = weights.cost(&current_metrics);
    let initial_cost = current_cost;
    let mut current = initial;

    let mut best_layout = current.clone();
    let mut best_metrics = current_metrics;
    let mut best_cost = current_cost;

    tracing::info!(
        iterations = schedule.iterations,
        initial_cost,
        "starting simulated annealing"
    );

    let mut temperature = schedule.initial_temperature;
    let mut trace = Vec::with_capacity(schedule.iterations);

    for iteration in 0..schedule.iterations {
        let candidate = neighbor_layout(&current, rng)?;
        let candidate_metrics = objective.evaluate(&candidate, rng)?;
        let candidate_cost = weights.cost(&candidate_metrics);

        let delta = candidate_cost - current_cost;
        let accepted = delta < 0.0 || rng.random::<f64>() < (-delta / temperature).exp();
        if accepted {
            current = candidate;
            current_metrics = candidate_metrics;
            current_cost = candidate_cost;
        }

        if current_cost < best_cost {
            best_layout = current.clone();
            best_metrics = current_metrics;
            best_cost = current_cost;
        }

        trace.push(AnnealStep {
            iteration,
            temperature,
            current_cost,
            candidate_cost,
            best_cost,
            accepted,
        });
        tracing::debug!(
            iteration,
            temperature,
            current_cost,
            candidate_cost,
            best_cost,
            accepted,
            "annealing step"
        );

        temperature *= schedule.cooling_rate;
    }

    tracing::info!(best_cost, ?best_metrics, "simulated annealing finished");
    Ok(AnnealOutcome { best_layout, best_metrics, best_cost, initial_cost, trace })
}
