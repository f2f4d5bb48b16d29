//! Trackable entities and their display payload.

use crate::{EntityId, GeoPoint};

/// What kind of record an entity is.  Only lost pets move and beacon.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    #[default]
    Lost,
    Found,
    Adoption,
}

impl EntityKind {
    /// `true` for the kind that is simulated as a moving proximity source.
    /// Static markers (found pets, adoption listings) never are.
    #[inline]
    pub fn is_trackable(self) -> bool {
        matches!(self, EntityKind::Lost)
    }
}

/// A record the engine can simulate.
///
/// The engine reads `id`, `kind`, and `coordinate`, and only ever writes
/// `coordinate`.  `payload` is passed through untouched.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedEntity<P = PetProfile> {
    pub id:         EntityId,
    pub kind:       EntityKind,
    /// `None` makes the entity inert: never moved, never evaluated.
    pub coordinate: Option<GeoPoint>,
    pub payload:    P,
}

impl<P> TrackedEntity<P> {
    pub fn new(
        id:         impl Into<EntityId>,
        kind:       EntityKind,
        coordinate: Option<GeoPoint>,
        payload:    P,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            coordinate,
            payload,
        }
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.coordinate.is_some()
    }
}

/// Species of a pet record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Species {
    Dog,
    Cat,
    #[default]
    Other,
}

/// Display metadata of a reported pet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PetProfile {
    pub name:        String,
    pub species:     Species,
    pub image_url:   String,
    pub description: String,
    /// Human-readable place the pet was last reported at.
    pub address:     Option<String>,
}
