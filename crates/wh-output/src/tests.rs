//! Unit tests for wh-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;
    use wh_core::RobotId;
    use wh_optim::{AnnealStep, Metrics, MosaStep, ParetoArchive};

    use crate::csv::CsvWriter;
    use crate::row::{CongestionRow, RobotSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, name: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for name in [
            "tick_summaries.csv",
            "robot_snapshots.csv",
            "robot_reports.csv",
            "congestion.csv",
            "anneal_trace.csv",
            "mosa_trace.csv",
            "pareto_archive.csv",
        ] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("congestion.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (h, _) = read(&dir, "tick_summaries.csv");
        assert_eq!(h, ["tick", "moves", "blocked", "replans", "waiting"]);
        let (h, _) = read(&dir, "congestion.csv");
        assert_eq!(h, ["x", "y", "visits"]);
        let (h, _) = read(&dir, "pareto_archive.csv");
        assert_eq!(h, ["total_distance", "max_congestion", "total_energy"]);
        let (h, _) = read(&dir, "robot_reports.csv");
        assert_eq!(h[0], "robot");
        assert_eq!(h.len(), 13);
    }

    #[test]
    fn tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 3, moves: 2, blocked: 1, replans: 1, waiting: 0 })
            .unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[0][2], "1");
    }

    #[test]
    fn snapshot_rows_use_robot_names() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[
            RobotSnapshotRow { tick: 0, robot: RobotId(0), x: 1, y: 2, at_target: false },
            RobotSnapshotRow { tick: 0, robot: RobotId(7), x: 3, y: 4, at_target: true },
        ])
        .unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "robot_snapshots.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "ROBOT_000");
        assert_eq!(&rows[1][1], "ROBOT_007");
        assert_eq!(&rows[1][4], "1");
    }

    #[test]
    fn optimizer_reports_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_anneal_trace(&[AnnealStep {
            iteration:      0,
            temperature:    1000.0,
            current_cost:   12.5,
            candidate_cost: 10.0,
            best_cost:      10.0,
            accepted:       true,
        }])
        .unwrap();
        w.write_mosa_trace(&[
            MosaStep { iteration: 0, temperature: 1000.0, archive_size: 1, moved: false },
            MosaStep { iteration: 1, temperature: 950.0, archive_size: 2, moved: true },
        ])
        .unwrap();
        let mut archive = ParetoArchive::new();
        archive.update(Metrics { total_distance: 10, max_congestion: 3, total_energy: 12.0 });
        archive.update(Metrics { total_distance: 12, max_congestion: 1, total_energy: 12.5 });
        w.write_pareto_archive(&archive).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "anneal_trace.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "12.5");
        assert_eq!(&rows[0][5], "1");

        let (_, rows) = read(&dir, "mosa_trace.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "2");

        let (_, rows) = read(&dir, "pareto_archive.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "12.5");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_congestion(&Vec::<CongestionRow>::new()).unwrap();
        w.write_pareto_archive(&ParetoArchive::new()).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;
    use wh_core::{Cell, SimConfig};
    use wh_grid::{AStarPlanner, Grid, GridBuilder};
    use wh_robot::RobotStore;
    use wh_sim::{Sim, SimBuilder};

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::writer::OutputWriter;

    /// One robot walking four cells up a 5×5 spine.
    fn spine_sim() -> Sim<AStarPlanner> {
        let mut b = GridBuilder::new(5, 5);
        b.add_aisle("SPINE", Cell::new(2, 0), Cell::new(2, 4))
            .add_dock("DOCK_A", Cell::new(2, 4))
            .add_station("PACK_1", Cell::new(2, 0));
        let grid: Grid = b.build().unwrap();

        let mut robots = RobotStore::default();
        robots.create_and_add_robot(Cell::new(2, 4), &grid).unwrap();
        let config = SimConfig::default();
        let planner = AStarPlanner::from_config(&config);
        SimBuilder::new(config, grid, robots, planner)
            .targets(vec![Cell::new(2, 0)])
            .build()
            .unwrap()
    }

    fn records(dir: &TempDir, name: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn run_writes_one_summary_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = spine_sim();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), 2);
        let report = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(report.ticks, 4);

        // on_run_end flushes, so rows are readable before finish().
        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[3][0], "3");
        assert!(rows.iter().all(|r| &r[1] == "1"), "one move per tick");

        // snapshot_interval = 2 → ticks 0 and 2.
        let snaps = records(&dir, "robot_snapshots.csv");
        assert_eq!(snaps.len(), 2);
        assert_eq!((&snaps[0][2], &snaps[0][3]), ("2", "3"));
        assert_eq!((&snaps[1][2], &snaps[1][3]), ("2", "1"));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = spine_sim();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), 0);
        sim.run(&mut obs).unwrap();
        assert!(records(&dir, "robot_snapshots.csv").is_empty());
    }

    #[test]
    fn final_state_reports_energy_and_congestion() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = spine_sim();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), 0);
        sim.run(&mut obs).unwrap();

        let mut writer = obs.into_writer();
        writer.write_final_state(&sim.robots, &sim.grid).unwrap();
        writer.finish().unwrap();

        let reports = records(&dir, "robot_reports.csv");
        assert_eq!(reports.len(), 1);
        assert_eq!(&reports[0][0], "ROBOT_000");
        assert_eq!((&reports[0][1], &reports[0][2]), ("2", "0"));
        assert_eq!(&reports[0][5], "4"); // total_energy_spent
        assert_eq!(&reports[0][6], "4"); // successful_moves
        assert_eq!(&reports[0][10], "0"); // distance_to_target
        assert_eq!(&reports[0][11], "4"); // path_length

        // Row-major: (2,0) (2,1) (2,2) (2,3), one visit each.
        let cells = records(&dir, "congestion.csv");
        assert_eq!(cells.len(), 4);
        assert_eq!((&cells[0][0], &cells[0][1], &cells[0][2]), ("2", "0", "1"));
        assert_eq!((&cells[3][0], &cells[3][1]), ("2", "3"));
    }
}
