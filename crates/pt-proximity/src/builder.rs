//! Fluent builder for constructing a [`ProximityEngine`].

use pt_core::{GeoPoint, ProximityConfig, RandomSource, SimRng, Tick, TrackedEntity};

use crate::engine::{check_observer, check_unique};
use crate::{InRangeSet, ProximityEngine, ProximityResult};

/// Fluent builder for [`ProximityEngine<P, S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.observer(p)`          | `(0, 0)`                         |
/// | `.entities(v)`          | Empty working set                |
/// | `.random_source(s)`     | `SimRng::new(config.seed)`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config)
///     .observer(user)
///     .entities(lost_pets)
///     .random_source(SequenceSource::new(vec![0.25, 0.5]))
///     .build()?;
/// ```
pub struct EngineBuilder<P, S: RandomSource = SimRng> {
    config:   ProximityConfig,
    observer: GeoPoint,
    entities: Vec<TrackedEntity<P>>,
    rng:      S,
}

impl<P> EngineBuilder<P, SimRng> {
    /// Create a builder seeded from `config.seed`.
    pub fn new(config: ProximityConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            observer: GeoPoint::new(0.0, 0.0),
            entities: Vec::new(),
            rng,
        }
    }
}

impl<P, S: RandomSource> EngineBuilder<P, S> {
    /// Initial observer snapshot.
    pub fn observer(mut self, observer: GeoPoint) -> Self {
        self.observer = observer;
        self
    }

    /// Initial working set.  Ids must be unique.
    pub fn entities(mut self, entities: Vec<TrackedEntity<P>>) -> Self {
        self.entities = entities;
        self
    }

    /// Substitute the random source (e.g. a fixed script in tests).
    pub fn random_source<T: RandomSource>(self, rng: T) -> EngineBuilder<P, T> {
        EngineBuilder {
            config:   self.config,
            observer: self.observer,
            entities: self.entities,
            rng,
        }
    }

    /// Validate inputs and return a ready-to-tick [`ProximityEngine`].
    pub fn build(self) -> ProximityResult<ProximityEngine<P, S>> {
        self.config.validate()?;
        check_observer(self.observer)?;
        check_unique(&self.entities)?;

        Ok(ProximityEngine {
            config:   self.config,
            observer: self.observer,
            entities: self.entities,
            in_range: InRangeSet::new(),
            rng:      self.rng,
            tick:     Tick::ZERO,
        })
    }
}
