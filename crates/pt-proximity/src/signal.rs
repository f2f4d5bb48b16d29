//! Distance rounding and the synthetic signal-strength metric.
//!
//! Both use `f64::round`, i.e. ties round away from zero: 2.5 → 3.

/// Signal strength in `[0, 100]` for an entity `distance_m` away.
///
/// Linear falloff: 100 at the observer, 0 at (and beyond) the radius.
/// A NaN distance reads as 0.
pub fn signal_strength(distance_m: f64, radius_m: f64) -> u8 {
    if distance_m.is_nan() || distance_m >= radius_m {
        return 0;
    }
    let raw = 100.0 - (distance_m / radius_m) * 100.0;
    raw.round().clamp(0.0, 100.0) as u8
}

/// Distance reported to callbacks and queries: nearest whole metre.
#[inline]
pub fn round_distance(distance_m: f64) -> u32 {
    // `as` saturates; NaN becomes 0.
    distance_m.max(0.0).round() as u32
}
