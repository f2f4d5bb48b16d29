//! `pt-proximity` — the proximity simulation engine.
//!
//! # Tick
//!
//! ```text
//! tick:
//!   ① Move:     every placed entity takes one random-walk step.
//!   ② Measure:  haversine distance from the observer snapshot.
//!   ③ Enter:    d <= radius and not yet in range → add to in-range set,
//!               fire on_alert once.
//!   ④ Leave:    d >  radius → drop from in-range set (re-arms the alert).
//!   ⑤ Publish:  on_positions with the full entity list, alert or not.
//! ```
//!
//! The engine is synchronous and owns no timer.  `pt-runtime` drives it on a
//! fixed interval; tests and batch tools call [`ProximityEngine::tick`]
//! directly.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pt_core::{GeoPoint, ProximityConfig};
//! use pt_proximity::{EngineBuilder, NoopObserver};
//!
//! let mut engine = EngineBuilder::new(ProximityConfig::default())
//!     .observer(GeoPoint::new(-12.0464, -77.0428))
//!     .entities(lost_pets)
//!     .build()?;
//! engine.run_ticks(10, &mut NoopObserver);
//! ```

pub mod alert;
pub mod builder;
pub mod engine;
pub mod error;
pub mod movement;
pub mod nearby;
pub mod observer;
pub mod signal;
pub mod state;


pub use alert::ProximityAlert;
pub use builder::EngineBuilder;
pub use engine::{ProximityEngine, TickSummary};
pub use error::{ProximityError, ProximityResult};
pub use movement::random_walk_step;
pub use nearby::nearby_entities;
pub use observer::{NoopObserver, ProximityObserver};
pub use signal::{round_distance, signal_strength};
pub use state::InRangeSet;
