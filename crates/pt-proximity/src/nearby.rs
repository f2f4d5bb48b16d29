//! Stateless "who is near me right now" query.

use pt_core::{GeoPoint, TrackedEntity};

use crate::ProximityAlert;

/// All trackable, placed entities within `radius_m` of `observer`, nearest
/// first.
///
/// Static kinds (found pets, adoption listings) are skipped even when they
/// carry a coordinate.  Entities at equal distance keep their input order.
/// Pure: takes no engine state and mutates nothing, so it is safe to call
/// while a simulation is running.
pub fn nearby_entities<P: Clone>(
    observer: GeoPoint,
    entities: &[TrackedEntity<P>],
    radius_m: f64,
) -> Vec<ProximityAlert<P>> {
    let mut hits: Vec<(f64, &TrackedEntity<P>)> = entities
        .iter()
        .filter(|e| e.kind.is_trackable())
        .filter_map(|e| {
            let d = observer.distance_m(e.coordinate?);
            (d <= radius_m).then_some((d, e))
        })
        .collect();

    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    hits.into_iter()
        .map(|(d, e)| ProximityAlert::measured(e.clone(), d, radius_m))
        .collect()
}
