//! Pluggable random sources for the random walk.
//!
//! # Determinism strategy
//!
//! The engine never touches a global RNG.  It draws from a [`RandomSource`]
//! handed to it at construction:
//!
//! - [`SimRng`] wraps a seeded `SmallRng`.  Each run of a timer-driven
//!   simulation gets a child derived from the root seed, so a sequence of
//!   `start` calls is reproducible as a whole.
//! - [`SequenceSource`] replays a fixed list of draws.  Tests use it to pin
//!   headings and step lengths exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Largest `f64` strictly below 1.0.
const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded simulation RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.  Each simulation run
    /// is seeded this way from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SequenceSource ────────────────────────────────────────────────────────────

/// Replays `values` in order, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` so a hand-written script cannot push the
/// walk outside its documented step range.  An empty script yields `0.0`.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, MAX_UNIT)
    }
}
