//! `pt-core` — foundational types for the `pawtrack` proximity simulator.
//!
//! This crate is a dependency of every other `pt-*` crate.  It intentionally
//! has no `pt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`                                            |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`entity`]      | `TrackedEntity`, `EntityKind`, `PetProfile`           |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `ProximityConfig`                                     |
//! | [`rng`]         | `RandomSource`, `SimRng`, `SequenceSource`            |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//! | `incident`      | Backend incident records → `TrackedEntity` (`serde`)  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types and     |
//!           | enables the `incident` module.                             |

pub mod config;
pub mod entity;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(feature = "serde")]
pub mod incident;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ProximityConfig;
pub use entity::{EntityKind, PetProfile, Species, TrackedEntity};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::EntityId;
pub use rng::{RandomSource, SequenceSource, SimRng};
pub use time::Tick;

#[cfg(feature = "serde")]
pub use incident::{Incident, parse_incidents};
