//! `pt-runtime` — drives a [`ProximityEngine`][pt_proximity::ProximityEngine]
//! on a fixed wall-clock interval.
//!
//! One [`ProximitySimulation`] owns at most one run at a time.  A run is a
//! single tokio task ticking on `tokio::time::interval`; the engine, its
//! entities, and its in-range set live inside that task and are dropped when
//! the run stops.
//!
//! ```rust,ignore
//! let sim = Arc::new(ProximitySimulation::new(ProximityConfig::default())?);
//! sim.start(
//!     lost_pets,
//!     user_location,
//!     |pets| redraw_markers(pets),
//!     |alert| notify(alert),
//! )?;
//! // … later, from anywhere (including inside a callback):
//! sim.stop();
//! ```

pub mod error;
pub mod simulation;

mod sink;

#[cfg(test)]
mod tests;

pub use error::{RuntimeError, RuntimeResult};
pub use simulation::ProximitySimulation;
