//! Drop outcome and wall placement
//!
//! Pure functions: given a frozen width and the round's gaps, decide how the
//! drop ends and where the block comes to rest.

use rand::Rng;

use super::state::{Outcome, WallGeometry};
use crate::tuning::{Layout, Tuning};

/// Classify a drop. Both intervals are half-open:
/// `[0, base_gap)` falls through, `[base_gap, wall_gap)` succeeds,
/// `[wall_gap, ∞)` is blocked.
pub fn resolve_outcome(width: f32, walls: &WallGeometry) -> Outcome {
    if width < walls.base_gap {
        Outcome::FallThrough
    } else if width < walls.wall_gap {
        Outcome::Success
    } else {
        Outcome::Blocked
    }
}

/// Where the block's center ends up after the drop
pub fn landing_y(outcome: Outcome, width: f32, tuning: &Tuning) -> f32 {
    let layout: &Layout = &tuning.layout;
    let floor = layout.floor_y - layout.viewport_height / 2.0 + width / 2.0;
    match outcome {
        Outcome::FallThrough => tuning.fall_through_y,
        Outcome::Success => floor + layout.base_wall_height,
        Outcome::Blocked => {
            floor + layout.base_wall_height + layout.inner_wall_height - tuning.blocked_overlap
        }
    }
}

/// Draw the next round's gaps.
///
/// `base_gap` is uniform in `[min, min + spread)`; `wall_gap` adds the fixed
/// margin plus a uniform `[0, wall_spread)`. Level does not enter into it.
pub fn generate_walls<R: Rng>(rng: &mut R, tuning: &Tuning) -> WallGeometry {
    // random_range keeps the upper bound exclusive even after f32 rounding
    let base_gap = rng.random_range(tuning.base_gap_min..tuning.base_gap_min + tuning.base_gap_spread);
    let wall_gap = base_gap + tuning.wall_margin + rng.random_range(0.0..tuning.wall_spread);
    WallGeometry::new(base_gap, wall_gap)
}
