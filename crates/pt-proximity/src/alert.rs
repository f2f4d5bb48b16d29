use std::fmt;

use pt_core::{PetProfile, TrackedEntity};

use crate::signal::{round_distance, signal_strength};

/// An entity observed inside the detection radius.
///
/// Emitted once per in-range dwell by the tick loop, and returned in bulk by
/// [`nearby_entities`][crate::nearby_entities].
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityAlert<P = PetProfile> {
    /// Snapshot of the entity at the moment it was measured.
    pub entity:          TrackedEntity<P>,
    pub distance_m:      u32,
    pub signal_strength: u8,
}

impl<P> ProximityAlert<P> {
    pub fn measured(entity: TrackedEntity<P>, distance_m: f64, radius_m: f64) -> Self {
        Self {
            entity,
            distance_m:      round_distance(distance_m),
            signal_strength: signal_strength(distance_m, radius_m),
        }
    }
}

impl<P> fmt::Display for ProximityAlert<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} m (signal {}%)",
            self.entity.id, self.distance_m, self.signal_strength
        )
    }
}
