//! Random-walk displacement.

use std::f64::consts::TAU;

use pt_core::{GeoPoint, RandomSource};

/// One "slow walking" step from `from`.
///
/// Heading is uniform in `[0, 2π)`, length is `step_scale_deg * (U + 0.5)`.
/// The heading is drawn first, then the length.  Heading 0 points north:
/// the cosine goes to latitude, the sine to longitude.
pub fn random_walk_step<S>(from: GeoPoint, step_scale_deg: f64, rng: &mut S) -> GeoPoint
where
    S: RandomSource + ?Sized,
{
    let heading = rng.next_unit() * TAU;
    let step = step_scale_deg * (rng.next_unit() + 0.5);
    from.offset_deg(step * heading.cos(), step * heading.sin())
}
