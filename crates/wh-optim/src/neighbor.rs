//! Neighbour-layout generation: one storage/aisle swap.

use wh_core::SimRng;
use wh_grid::Grid;

use crate::OptimResult;

/// Copy `layout` and swap one uniformly chosen storage cell with one
/// uniformly chosen aisle cell.  Docks and stations never move.
///
/// If the layout has no storage or no swappable aisle cell the copy is
/// returned unchanged.
pub fn neighbor_layout(layout: &Grid, rng: &mut SimRng) -> OptimResult<Grid> {
    let mut next = layout.clone();
    let storage = next.swappable_storage();
    let aisle = next.swappable_aisle_cells();

    let (Some(&from), Some(&to)) = (rng.choose(&storage), rng.choose(&aisle)) else {
        tracing::warn!(
            storage = storage.len(),
            aisle = aisle.len(),
            "no eligible storage/aisle swap; neighbour equals current layout"
        );
        return Ok(next);
    };

    next.swap_storage_with_aisle(from, to)?;
    tracing::trace!(storage = %from, aisle = %to, "swapped");
    Ok(next)
}
