//! Backend incident records and their mapping onto [`TrackedEntity`].
//!
//! The host fetches incidents over its own REST calls; this module only
//! understands the JSON shape.  Location is a GeoJSON `Point`, so the
//! coordinate pair is `[longitude, latitude]`.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, EntityKind, GeoPoint, PetProfile, Species, TrackedEntity};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    Lost,
    Adoption,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    Active,
    Resolved,
    Closed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLocation {
    #[serde(rename = "type", default = "point_type")]
    pub kind:        String,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

fn point_type() -> String {
    "Point".to_owned()
}

/// One incident as served by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(rename = "_id")]
    pub id:            String,
    pub incident_type: IncidentType,
    pub pet_name:      String,
    #[serde(default)]
    pub pet_type:      Species,
    #[serde(default)]
    pub description:   String,
    #[serde(default)]
    pub image_urls:    Vec<String>,
    #[serde(default)]
    pub location:      Option<PointLocation>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub status:        IncidentStatus,
}

impl Incident {
    /// Lost + active is the only combination that still wanders around.
    pub fn entity_kind(&self) -> EntityKind {
        match (self.incident_type, self.status) {
            (IncidentType::Lost, IncidentStatus::Active) => EntityKind::Lost,
            (IncidentType::Lost, _)                      => EntityKind::Found,
            (IncidentType::Adoption, _)                  => EntityKind::Adoption,
        }
    }

    /// Decoded coordinate, or `None` when missing or out of bounds.
    pub fn coordinate(&self) -> Option<GeoPoint> {
        let [lon, lat] = self.location.as_ref()?.coordinates;
        let point = GeoPoint::new(lat, lon);
        point.is_valid().then_some(point)
    }
}

impl From<Incident> for TrackedEntity<PetProfile> {
    fn from(incident: Incident) -> Self {
        let kind = incident.entity_kind();
        let coordinate = incident.coordinate();
        let Incident {
            id,
            pet_name,
            pet_type,
            description,
            image_urls,
            location_name,
            ..
        } = incident;

        TrackedEntity::new(
            id,
            kind,
            coordinate,
            PetProfile {
                name:      pet_name,
                species:   pet_type,
                image_url: image_urls.into_iter().next().unwrap_or_default(),
                description,
                address:   location_name,
            },
        )
    }
}

/// Parse a JSON array of incidents into tracked entities.
pub fn parse_incidents(json: &str) -> CoreResult<Vec<TrackedEntity<PetProfile>>> {
    let incidents: Vec<Incident> =
        serde_json::from_str(json).map_err(|e| CoreError::Parse(e.to_string()))?;
    Ok(incidents.into_iter().map(TrackedEntity::from).collect())
}
