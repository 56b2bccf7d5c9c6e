//! Ready-made facility layouts.
//!
//! [`sample_layout`] is a fixed hand-designed facility useful for demos and
//! regression tests.  [`random_layout`] generates seeded random facilities
//! that serve as starting points for the layout optimizers.

use wh_core::{Cell, SimRng};

use crate::{Grid, GridBuilder, GridError, GridResult};

/// Default probability that a non-aisle cell becomes storage.
pub const DEFAULT_STORAGE_DENSITY: f64 = 0.8;

/// The fixed 20×15 sample facility.
///
/// Four docks on the bottom row, four packing stations on the top row, three
/// horizontal main aisles, dock connectors, short station connectors, three
/// extra vertical aisles, and eight 2×3 storage blocks.
pub fn sample_layout() -> GridResult<Grid> {
    let mut b = GridBuilder::new(20, 15);

    for (name, x) in [("DOCK_A", 2), ("DOCK_B", 7), ("DOCK_C", 12), ("DOCK_D", 17)] {
        b.add_dock(name, Cell::new(x, 14));
    }
    for (name, x) in [("PACK_1", 3), ("PACK_2", 8), ("PACK_3", 13), ("PACK_4", 18)] {
        b.add_station(name, Cell::new(x, 0));
    }

    for (i, y) in [2, 7, 12].into_iter().enumerate() {
        b.add_aisle(format!("MAIN_AISLE_{}", i + 1), Cell::new(0, y), Cell::new(19, y));
    }
    for (dock, x) in [("A", 2), ("B", 7), ("C", 12), ("D", 17)] {
        b.add_aisle(format!("DOCK_{dock}_CONNECTOR"), Cell::new(x, 0), Cell::new(x, 14));
    }
    for (i, x) in [3, 8, 13, 18].into_iter().enumerate() {
        b.add_aisle(format!("PACK_{}_CONNECTOR", i + 1), Cell::new(x, 0), Cell::new(x, 2));
    }
    for (i, x) in [4, 9, 14].into_iter().enumerate() {
        b.add_aisle(format!("VERTICAL_{}", i + 1), Cell::new(x, 0), Cell::new(x, 14));
    }

    // Storage between the connectors, two bands of four blocks.
    for (y0, y1) in [(3, 5), (8, 10)] {
        for (x0, x1) in [(0, 1), (5, 6), (10, 11), (15, 16)] {
            b.add_storage_block(x0, y0, x1, y1);
        }
    }

    b.build()
}

/// Generate a random facility sized for `robot_count` robots.
///
/// - `robot_count` docks on the bottom row and as many stations on the top
///   row, each at distinct random columns in `1..width-1` (capped at the
///   number of available columns).
/// - A full-height vertical aisle through every dock and station column.
/// - `min(height / 4, 4)` full-width horizontal aisles at distinct random
///   rows in `2..height-2`.
/// - Every remaining cell becomes storage with probability
///   `storage_density`.
pub fn random_layout(
    width:           i32,
    height:          i32,
    robot_count:     usize,
    storage_density: f64,
    rng:             &mut SimRng,
) -> GridResult<Grid> {
    if width < 3 || height < 2 {
        return Err(GridError::InvalidDimensions { width, height });
    }

    let columns: Vec<i32> = (1..width - 1).collect();
    if robot_count > columns.len() {
        tracing::debug!(
            robot_count,
            columns = columns.len(),
            "random layout capped docks/stations at available columns"
        );
    }

    let mut dock_xs = rng.sample(&columns, robot_count);
    dock_xs.sort_unstable();
    let mut station_xs = rng.sample(&columns, robot_count);
    station_xs.sort_unstable();

    let mut b = GridBuilder::new(width, height);
    for (i, &x) in dock_xs.iter().enumerate() {
        b.add_dock(format!("DOCK_{i}"), Cell::new(x, height - 1));
    }
    for (i, &x) in station_xs.iter().enumerate() {
        b.add_station(format!("PACK_{i}"), Cell::new(x, 0));
    }

    let mut aisle_xs: Vec<i32> = dock_xs.iter().chain(&station_xs).copied().collect();
    aisle_xs.sort_unstable();
    aisle_xs.dedup();
    for &x in &aisle_xs {
        b.add_aisle(format!("V_AISLE_{x}"), Cell::new(x, 0), Cell::new(x, height - 1));
    }

    let rows: Vec<i32> = (2..(height - 2).max(2)).collect();
    let horizontal = ((height / 4).min(4)) as usize;
    for (i, y) in rng.sample(&rows, horizontal).into_iter().enumerate() {
        b.add_aisle(format!("H_AISLE_{i}"), Cell::new(0, y), Cell::new(width - 1, y));
    }

    let mut grid = b.build()?;

    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x, y);
            if !grid.is_position_in_aisle(cell) && rng.random::<f64>() < storage_density {
                grid.add_blocked_position(cell)?;
            }
        }
    }

    Ok(grid)
}
