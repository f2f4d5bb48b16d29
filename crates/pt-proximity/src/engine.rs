//! The `ProximityEngine` struct and its tick.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use pt_core::{
    CoreError, EntityId, GeoPoint, ProximityConfig, RandomSource, SimRng, Tick, TrackedEntity,
};
use tracing::{debug, info, warn};

use crate::nearby::nearby_entities;
use crate::{
    InRangeSet, ProximityAlert, ProximityError, ProximityObserver, ProximityResult,
    random_walk_step,
};

// ── TickSummary ───────────────────────────────────────────────────────────────

/// Counters for one completed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:      Tick,
    /// Entities with a coordinate (moved and measured this tick).
    pub simulated: usize,
    /// Entities inside the radius after this tick's move.
    pub in_range:  usize,
    /// Alerts fired (entities that entered the radius this tick).
    pub alerts:    usize,
    /// Observer hooks that panicked during this tick.
    pub faults:    usize,
}

// ── ProximityEngine ───────────────────────────────────────────────────────────

/// Synchronous proximity simulation.
///
/// `ProximityEngine<P, S>` owns the working set of entities, the observer
/// snapshot, the in-range set, and the random source.  Each call to
/// [`tick`][Self::tick] runs one full step to completion before returning,
/// so ticks can never interleave.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct ProximityEngine<P, S: RandomSource = SimRng> {
    pub(crate) config:   ProximityConfig,
    pub(crate) observer: GeoPoint,
    pub(crate) entities: Vec<TrackedEntity<P>>,
    pub(crate) in_range: InRangeSet,
    pub(crate) rng:      S,
    pub(crate) tick:     Tick,
}

impl<P, S: RandomSource> ProximityEngine<P, S> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// The tick that will run next.  `T0` right after construction or reset.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn observer_position(&self) -> GeoPoint {
        self.observer
    }

    pub fn entities(&self) -> &[TrackedEntity<P>] {
        &self.entities
    }

    /// `true` if `id` has alerted and not yet left the radius.
    pub fn is_in_range(&self, id: &EntityId) -> bool {
        self.in_range.contains(id)
    }

    // ── Working set ───────────────────────────────────────────────────────

    /// Replace the working set with a fresh list from the entity source.
    ///
    /// Clears the in-range set: every entity may alert again.  The tick
    /// counter keeps running.
    pub fn load(&mut self, entities: Vec<TrackedEntity<P>>, observer: GeoPoint) -> ProximityResult<()> {
        check_observer(observer)?;
        check_unique(&entities)?;
        self.entities = entities;
        self.observer = observer;
        self.in_range.clear();
        Ok(())
    }

    /// Replace the observer snapshot used from the next tick on.
    pub fn set_observer(&mut self, observer: GeoPoint) -> ProximityResult<()> {
        check_observer(observer)?;
        self.observer = observer;
        Ok(())
    }

    /// Drop all entities and per-run state.  Back to `T0`.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.in_range.clear();
        self.tick = Tick::ZERO;
    }

    /// [`nearby_entities`] with this engine's radius.  Reads no engine state
    /// besides the configuration.
    pub fn nearby(&self, observer: GeoPoint, entities: &[TrackedEntity<P>]) -> Vec<ProximityAlert<P>>
    where
        P: Clone,
    {
        nearby_entities(observer, entities, self.config.detection_radius_m)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run exactly `n` ticks, returning the summary of each.
    pub fn run_ticks<O>(&mut self, n: u64, observer: &mut O) -> Vec<TickSummary>
    where
        P: Clone,
        O: ProximityObserver<P>,
    {
        (0..n).map(|_| self.tick(observer)).collect()
    }

    /// Run one tick: move, measure, alert on entry, re-arm on exit, publish.
    pub fn tick<O>(&mut self, observer: &mut O) -> TickSummary
    where
        P: Clone,
        O: ProximityObserver<P>,
    {
        let now = self.tick;
        let radius = self.config.detection_radius_m;
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        if !isolated(now, "on_tick_start", || observer.on_tick_start(now)) {
            summary.faults += 1;
        }

        // ── Phase 1: random walk ──────────────────────────────────────────
        let step_scale = self.config.step_scale_deg;
        for entity in &mut self.entities {
            if let Some(at) = entity.coordinate {
                entity.coordinate = Some(random_walk_step(at, step_scale, &mut self.rng));
            }
        }

        // ── Phase 2: measure, enter, leave ────────────────────────────────
        for entity in &self.entities {
            let Some(at) = entity.coordinate else { continue };
            summary.simulated += 1;

            let distance = self.observer.distance_m(at);
            if distance <= radius {
                summary.in_range += 1;
                if !self.in_range.enter(&entity.id) {
                    continue;
                }
                let alert = ProximityAlert::measured(entity.clone(), distance, radius);
                info!(
                    tick = %now,
                    entity = %entity.id,
                    distance_m = alert.distance_m,
                    signal = alert.signal_strength,
                    "entity entered detection radius"
                );
                summary.alerts += 1;
                if !isolated(now, "on_alert", || observer.on_alert(now, &alert)) {
                    summary.faults += 1;
                }
            } else {
                self.in_range.leave(&entity.id);
            }
        }

        // ── Phase 3: position feed ────────────────────────────────────────
        let entities = self.entities.as_slice();
        if !isolated(now, "on_positions", || observer.on_positions(now, entities)) {
            summary.faults += 1;
        }

        debug!(
            tick = %now,
            simulated = summary.simulated,
            in_range = summary.in_range,
            alerts = summary.alerts,
            faults = summary.faults,
            "tick complete"
        );

        if !isolated(now, "on_tick_end", || observer.on_tick_end(&summary)) {
            summary.faults += 1;
        }

        self.tick = now.next();
        summary
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

pub(crate) fn check_observer(observer: GeoPoint) -> ProximityResult<()> {
    if observer.is_valid() {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate(observer).into())
    }
}

pub(crate) fn check_unique<P>(entities: &[TrackedEntity<P>]) -> ProximityResult<()> {
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in entities {
        if !seen.insert(&entity.id) {
            return Err(ProximityError::DuplicateEntity(entity.id.clone()));
        }
    }
    Ok(())
}

/// Run one observer hook, containing any panic.  Returns `false` on panic.
fn isolated(tick: Tick, hook: &'static str, f: impl FnOnce()) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => true,
        Err(payload) => {
            warn!(
                tick = %tick,
                hook,
                reason = panic_reason(payload.as_ref()),
                "observer callback panicked; continuing tick"
            );
            false
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
