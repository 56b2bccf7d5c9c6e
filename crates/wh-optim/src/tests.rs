//! Unit and property tests for wh-optim.

use std::cell::RefCell;

use wh_core::{Cell, SimRng};
use wh_grid::{Grid, GridBuilder};

use crate::{Metrics, Objective, OptimResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn metrics(d: u64, c: u32, e: f64) -> Metrics {
    Metrics { total_distance: d, max_congestion: c, total_energy: e }
}

/// 5×5 grid with a single vertical aisle at x = 2, one dock, one station.
fn spine_grid() -> Grid {
    let mut b = GridBuilder::new(5, 5);
    b.add_aisle("SPINE", Cell::new(2, 0), Cell::new(2, 4))
        .add_dock("DOCK_A", Cell::new(2, 4))
        .add_station("PACK_1", Cell::new(2, 0));
    b.build().unwrap()
}

/// Cheap deterministic objective derived from where storage sits.  Records
/// every metrics tuple it hands out.
#[derive(Default)]
struct StorageShape {
    seen: RefCell<Vec<Metrics>>,
}

impl Objective for StorageShape {
    fn evaluate(&self, layout: &Grid, _rng: &mut SimRng) -> OptimResult<Metrics> {
        let cells: Vec<Cell> = layout.blocked_cells().collect();
        let m = Metrics {
            total_distance: cells.iter().map(|c| (c.x + c.y) as u64).sum(),
            max_congestion: cells.iter().map(|c| c.x as u32).max().unwrap_or(0),
            total_energy:   cells.iter().map(|c| f64::from(c.y)).sum(),
        };
        self.seen.borrow_mut().push(m);
        Ok(m)
    }
}

/// Objective that ignores the layout and hands out `shape(n)` on its
/// `n`-th call, so every candidate's relation to the current layout is fixed
/// in advance.
struct Scripted {
    calls: RefCell<u64>,
    shape: fn(u64) -> Metrics,
}

impl Scripted {
    fn new(shape: fn(u64) -> Metrics) -> Self {
        Self { calls: RefCell::new(0), shape }
    }
}

impl Objective for Scripted {
    fn evaluate(&self, _layout: &Grid, _rng: &mut SimRng) -> OptimResult<Metrics> {
        let mut calls = self.calls.borrow_mut();
        let m = (self.shape)(*calls);
        *calls += 1;
        Ok(m)
    }
}

/// Each call strictly better than every earlier one.
fn improving(n: u64) -> Metrics {
    metrics(1_000 - n, 50, 1_000.0 - n as f64)
}

/// Each call strictly worse than every earlier one.
fn worsening(n: u64) -> Metrics {
    metrics(100 + n, 5, 100.0 + n as f64)
}

/// Longer but less congested on every call: no two calls dominate each other.
fn trading_off(n: u64) -> Metrics {
    metrics(100 + n, 1_000 - n as u32, 10.0)
}

fn test_layout(seed: u64) -> Grid {
    wh_grid::random_layout(10, 10, 2, 0.5, &mut SimRng::new(seed)).unwrap()
}

// ── Domination ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod domination {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn basic_cases() {
        let a = metrics(10, 2, 5.0);
        assert!(a.dominates(&metrics(11, 2, 5.0)));
        assert!(a.dominates(&metrics(10, 3, 6.0)));
        assert!(!a.dominates(&a), "equal tuples do not dominate");
        assert!(!a.dominates(&metrics(9, 5, 9.0)), "worse in one objective");
        assert!(!metrics(9, 5, 9.0).dominates(&a));
    }

    fn any_metrics() -> impl Strategy<Value = Metrics> {
        (0u64..20, 0u32..6, 0u32..40).prop_map(|(d, c, e)| metrics(d, c, f64::from(e) / 2.0))
    }

    proptest! {
        #[test]
        fn irreflexive(a in any_metrics()) {
            prop_assert!(!a.dominates(&a));
        }

        #[test]
        fn antisymmetric(a in any_metrics(), b in any_metrics()) {
            prop_assert!(!(a.dominates(&b) && b.dominates(&a)));
        }

        #[test]
        fn transitive(a in any_metrics(), b in any_metrics(), c in any_metrics()) {
            if a.dominates(&b) && b.dominates(&c) {
                prop_assert!(a.dominates(&c));
            }
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{AnnealSchedule, CostWeights, OptimError};
    use super::metrics;

    #[test]
    fn default_weights_cost() {
        let cost = CostWeights::default().cost(&metrics(10, 4, 20.0));
        assert!((cost - (5.0 + 1.2 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn default_schedule_is_valid() {
        let s = AnnealSchedule::default();
        assert_eq!((s.initial_temperature, s.cooling_rate, s.iterations), (1000.0, 0.95, 100));
        assert!(s.validate().is_ok());
        assert!((s.temperature_at(2) - 902.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_schedules() {
        for (t, r) in [(0.0, 0.9), (-1.0, 0.9), (f64::NAN, 0.9), (10.0, 1.0), (10.0, 0.0), (10.0, 1.5)] {
            let s = AnnealSchedule { initial_temperature: t, cooling_rate: r, iterations: 5 };
            assert!(matches!(s.validate(), Err(OptimError::Config(_))), "t={t} r={r}");
        }
    }
}

// ── Pareto archive ────────────────────────────────────────────────────────────

#[cfg(test)]
mod archive {
    use super::*;
    use crate::ParetoArchive;
    use proptest::prelude::*;

    #[test]
    fn update_rules() {
        let mut archive = ParetoArchive::new();
        assert!(archive.update(metrics(10, 2, 5.0)));
        assert!(archive.update(metrics(8, 3, 5.0)), "trade-off is kept");
        assert!(!archive.update(metrics(11, 3, 6.0)), "dominated newcomer rejected");
        assert_eq!(archive.len(), 2);

        assert!(archive.update(metrics(7, 1, 4.0)), "dominates both");
        assert_eq!(archive.members(), &[metrics(7, 1, 4.0)]);

        assert!(archive.update(metrics(7, 1, 4.0)), "duplicates are not deduplicated");
        assert_eq!(archive.len(), 2);
    }

    proptest! {
        #[test]
        fn stays_non_dominated_and_covers_history(
            seq in prop::collection::vec((0u64..12, 0u32..5, 0u32..12), 1..40)
        ) {
            let offered: Vec<Metrics> = seq
                .into_iter()
                .map(|(d, c, e)| metrics(d, c, f64::from(e)))
                .collect();
            let mut archive = ParetoArchive::new();
            for &m in &offered {
                archive.update(m);
                prop_assert!(archive.is_mutually_non_dominated());
            }
            prop_assert!(!archive.is_empty());
            for m in &offered {
                prop_assert!(archive.iter().any(|a| a == m || a.dominates(m)));
            }
        }
    }
}

// ── Neighbour layouts ─────────────────────────────────────────────────────────

#[cfg(test)]
mod neighbor {
    use super::*;
    use crate::neighbor_layout;

    fn strip() -> Grid {
        // Row 0: dock, aisle, station.  Row 1: storage.
        let mut b = GridBuilder::new(3, 2);
        b.add_aisle("ROW", Cell::new(0, 0), Cell::new(2, 0))
            .add_dock("D", Cell::new(0, 0))
            .add_station("S", Cell::new(2, 0))
            .add_storage_block(0, 1, 2, 1);
        b.build().unwrap()
    }

    #[test]
    fn swaps_one_pair_and_leaves_original_alone() {
        let layout = strip();
        let next = neighbor_layout(&layout, &mut SimRng::new(4)).unwrap();

        assert!(next.is_blocked_position(Cell::new(1, 0)));
        assert_eq!(next.blocked_cells().count(), 3);
        let opened: Vec<_> = (0..3)
            .map(|x| Cell::new(x, 1))
            .filter(|&c| next.is_traversable(c))
            .collect();
        assert_eq!(opened.len(), 1);

        assert_eq!(next.dock_positions(), layout.dock_positions());
        assert_eq!(next.station_positions(), layout.station_positions());
        assert!(next.is_traversable(Cell::new(0, 0)));
        assert!(layout.is_traversable(Cell::new(1, 0)), "input layout untouched");
    }

    #[test]
    fn no_candidates_returns_identical_copy() {
        let layout = spine_grid();
        let next = neighbor_layout(&layout, &mut SimRng::new(1)).unwrap();
        assert_eq!(next.aisles(), layout.aisles());
        assert_eq!(next.blocked_cells().count(), 0);
    }

    #[test]
    fn same_seed_same_neighbor() {
        let layout = test_layout(9);
        let a = neighbor_layout(&layout, &mut SimRng::new(2)).unwrap();
        let b = neighbor_layout(&layout, &mut SimRng::new(2)).unwrap();
        assert_eq!(a.blocked_cells().collect::<Vec<_>>(), b.blocked_cells().collect::<Vec<_>>());
        assert_eq!(a.aisles(), b.aisles());
    }
}

// ── Layout objective ──────────────────────────────────────────────────────────

#[cfg(test)]
mod objective {
    use super::*;
    use wh_core::SimConfig;
    use wh_sim::RunStatus;
    use crate::{LayoutEvaluator, OptimError};

    #[test]
    fn spine_metrics() {
        let evaluator = LayoutEvaluator::new(1, SimConfig::default());
        let sim = evaluator.simulate(spine_grid(), &mut SimRng::new(0)).unwrap();
        assert_eq!(sim.report.status, RunStatus::Success);
        assert_eq!(sim.metrics, metrics(4, 1, 4.0));
    }

    #[test]
    fn too_many_robots_fails_fast() {
        let evaluator = LayoutEvaluator::new(2, SimConfig::default());
        let err = evaluator.evaluate(&spine_grid(), &mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, OptimError::TooManyRobots { requested: 2, docks: 1, stations: 1 }));
    }

    #[test]
    fn evaluate_leaves_layout_untouched() {
        let layout = wh_grid::sample_layout().unwrap();
        let evaluator = LayoutEvaluator::new(4, SimConfig::default());
        let m = evaluator.evaluate(&layout, &mut SimRng::new(5)).unwrap();
        assert!(m.total_distance > 0);
        assert_eq!(layout.max_congestion(), 0);
    }

    #[test]
    fn seeded_evaluation_is_deterministic() {
        let layout = wh_grid::sample_layout().unwrap();
        let evaluator = LayoutEvaluator::new(4, SimConfig::default());
        let a = evaluator.evaluate(&layout, &mut SimRng::new(11)).unwrap();
        let b = evaluator.evaluate(&layout, &mut SimRng::new(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn robots_start_on_docks_and_aim_at_stations() {
        let layout = wh_grid::sample_layout().unwrap();
        let docks = layout.dock_positions();
        let stations = layout.station_positions();
        let evaluator = LayoutEvaluator::new(3, SimConfig::default());
        let sim = evaluator.simulate(layout, &mut SimRng::new(3)).unwrap().sim;

        assert_eq!(sim.robots.len(), 3);
        for id in sim.robots.ids() {
            let view = sim.robots.get(id).unwrap();
            assert!(docks.contains(&view.history[0]));
            assert!(stations.contains(&view.target));
        }
    }
}

// ── Simulated annealing ───────────────────────────────────────────────────────

#[cfg(test)]
mod annealing {
    use super::*;
    use crate::{AnnealSchedule, CostWeights, OptimError, simulated_annealing};

    fn schedule(iterations: usize) -> AnnealSchedule {
        AnnealSchedule { initial_temperature: 50.0, cooling_rate: 0.9, iterations }
    }

    #[test]
    fn best_is_minimum_of_everything_evaluated() {
        let objective = StorageShape::default();
        let weights = CostWeights::default();
        let outcome = simulated_annealing(
            test_layout(1), &objective, &weights, &schedule(60), &mut SimRng::new(7),
        )
        .unwrap();

        let seen = objective.seen.borrow();
        assert_eq!(seen.len(), 61, "initial layout plus one neighbour per iteration");
        let min = seen.iter().map(|m| weights.cost(m)).fold(f64::INFINITY, f64::min);
        assert_eq!(outcome.best_cost, min);
        assert_eq!(weights.cost(&outcome.best_metrics), outcome.best_cost);
        assert!(outcome.best_cost <= outcome.initial_cost);
    }

    #[test]
    fn trace_shape() {
        let objective = StorageShape::default();
        let outcome = simulated_annealing(
            test_layout(2), &objective, &CostWeights::default(), &schedule(25), &mut SimRng::new(3),
        )
        .unwrap();

        assert_eq!(outcome.trace.len(), 25);
        for pair in outcome.trace.windows(2) {
            assert!(pair[1].best_cost <= pair[0].best_cost, "best cost never increases");
            assert!((pair[1].temperature - pair[0].temperature * 0.9).abs() < 1e-9);
        }
        assert_eq!(outcome.trace[0].temperature, 50.0);
        for step in &outcome.trace {
            assert!(step.best_cost <= step.current_cost);
            assert!(step.best_cost <= step.candidate_cost);
        }
    }

    #[test]
    fn best_layout_scores_best_cost() {
        let objective = StorageShape::default();
        let weights = CostWeights::default();
        let outcome = simulated_annealing(
            test_layout(3), &objective, &weights, &schedule(30), &mut SimRng::new(8),
        )
        .unwrap();
        let rescored = objective.evaluate(&outcome.best_layout, &mut SimRng::new(0)).unwrap();
        assert_eq!(weights.cost(&rescored), outcome.best_cost);
    }

    #[test]
    fn invalid_schedule_rejected_before_evaluating() {
        let objective = StorageShape::default();
        let bad = AnnealSchedule { initial_temperature: 10.0, cooling_rate: 1.0, iterations: 5 };
        let result = simulated_annealing(
            test_layout(1), &objective, &CostWeights::default(), &bad, &mut SimRng::new(0),
        );
        assert!(matches!(result, Err(OptimError::Config(_))));
        assert!(objective.seen.borrow().is_empty());
    }

    #[test]
    fn worse_candidates_rejected_when_cold() {
        let objective = Scripted::new(worsening);
        let cold = AnnealSchedule { initial_temperature: 1e-3, cooling_rate: 0.9, iterations: 40 };
        let outcome = simulated_annealing(
            test_layout(1), &objective, &CostWeights::default(), &cold, &mut SimRng::new(5),
        )
        .unwrap();

        assert!(outcome.trace.iter().all(|s| !s.accepted));
        assert!(outcome.trace.iter().all(|s| s.current_cost == outcome.initial_cost));
        assert_eq!(outcome.best_cost, outcome.initial_cost);
    }

    #[test]
    fn better_candidates_always_accepted() {
        let objective = Scripted::new(improving);
        let outcome = simulated_annealing(
            test_layout(2), &objective, &CostWeights::default(), &schedule(30), &mut SimRng::new(5),
        )
        .unwrap();

        assert!(outcome.trace.iter().all(|s| s.accepted));
        assert_eq!(outcome.best_cost, outcome.trace.last().unwrap().candidate_cost);
    }

    #[test]
    fn runs_on_real_simulations() {
        let evaluator = crate::LayoutEvaluator::new(4, wh_core::SimConfig::default());
        let outcome = simulated_annealing(
            wh_grid::sample_layout().unwrap(),
            &evaluator,
            &CostWeights::default(),
            &schedule(5),
            &mut SimRng::new(21),
        )
        .unwrap();
        assert_eq!(outcome.trace.len(), 5);
        assert!(outcome.best_cost <= outcome.initial_cost);
        assert_eq!(outcome.best_layout.docks().len(), 4);
    }
}

// ── Multi-objective annealing ─────────────────────────────────────────────────

#[cfg(test)]
mod multi_objective {
    use super::*;
    use crate::{AnnealSchedule, NON_DOMINATED_ACCEPTANCE, ParetoArchive, mosa};

    fn schedule(iterations: usize) -> AnnealSchedule {
        AnnealSchedule { initial_temperature: 5.0, cooling_rate: 0.8, iterations }
    }

    #[test]
    fn archive_matches_replay_of_evaluations() {
        let objective = StorageShape::default();
        let outcome = mosa(test_layout(4), &objective, &schedule(40), &mut SimRng::new(6)).unwrap();

        let mut replay = ParetoArchive::new();
        for &m in objective.seen.borrow().iter() {
            replay.update(m);
        }
        assert_eq!(outcome.archive, replay);
        assert!(outcome.archive.is_mutually_non_dominated());
    }

    #[test]
    fn trace_records_archive_size() {
        let objective = StorageShape::default();
        let outcome = mosa(test_layout(5), &objective, &schedule(20), &mut SimRng::new(2)).unwrap();
        assert_eq!(outcome.trace.len(), 20);
        assert_eq!(outcome.trace.last().unwrap().archive_size, outcome.archive.len());
        assert!(outcome.trace.iter().all(|s| s.archive_size >= 1));
        assert!((outcome.trace[1].temperature - 4.0).abs() < 1e-9);
    }

    #[test]
    fn final_metrics_belong_to_final_layout() {
        let objective = StorageShape::default();
        let outcome = mosa(test_layout(6), &objective, &schedule(15), &mut SimRng::new(9)).unwrap();
        let rescored = objective.evaluate(&outcome.final_layout, &mut SimRng::new(0)).unwrap();
        assert_eq!(rescored, outcome.final_metrics);
    }

    #[test]
    fn dominating_neighbour_always_taken() {
        let objective = Scripted::new(improving);
        let outcome = mosa(test_layout(8), &objective, &schedule(30), &mut SimRng::new(1)).unwrap();
        assert!(outcome.trace.iter().all(|s| s.moved));
        assert_eq!(outcome.final_metrics, improving(30));
        assert_eq!(outcome.archive.members(), &[improving(30)]);
    }

    #[test]
    fn dominated_neighbour_refused_when_cold() {
        let objective = Scripted::new(worsening);
        let cold = AnnealSchedule { initial_temperature: 1e-3, cooling_rate: 0.9, iterations: 30 };
        let outcome = mosa(test_layout(9), &objective, &cold, &mut SimRng::new(1)).unwrap();
        assert!(outcome.trace.iter().all(|s| !s.moved));
        assert_eq!(outcome.final_metrics, worsening(0));
        assert_eq!(outcome.archive.members(), &[worsening(0)]);
    }

    #[test]
    fn non_dominated_neighbour_taken_about_half_the_time() {
        let objective = Scripted::new(trading_off);
        let iterations = 400;
        let outcome = mosa(test_layout(10), &objective, &schedule(iterations), &mut SimRng::new(17)).unwrap();

        let moves = outcome.trace.iter().filter(|s| s.moved).count();
        let rate = moves as f64 / iterations as f64;
        assert!(
            (rate - NON_DOMINATED_ACCEPTANCE).abs() < 0.15,
            "move rate {rate} far from {NON_DOMINATED_ACCEPTANCE}"
        );
        assert_eq!(outcome.archive.len(), iterations + 1, "every trade-off is kept");
    }

    #[test]
    fn zero_iterations_keeps_initial() {
        let objective = StorageShape::default();
        let layout = test_layout(7);
        let initial = objective.evaluate(&layout, &mut SimRng::new(0)).unwrap();
        let outcome = mosa(layout, &objective, &schedule(0), &mut SimRng::new(0)).unwrap();
        assert_eq!(outcome.archive.members(), &[initial]);
        assert!(outcome.trace.is_empty());
    }
}
