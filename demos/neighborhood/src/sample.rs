//! Built-in incident feed used when `--incidents` is not given.
//!
//! Same JSON shape the backend serves: GeoJSON points, `[lon, lat]`.
//! Centred on Lima; the first three sit inside the default 500 m radius of
//! the default observer.

pub const SAMPLE_INCIDENTS: &str = r#"[
  {
    "_id": "1", "incidentType": "lost", "status": "active",
    "petName": "Rocky", "petType": "dog",
    "description": "Got scared on a walk and bolted.",
    "imageUrls": ["https://images.unsplash.com/photo-1568572933382-74d440642117?w=400"],
    "location": { "type": "Point", "coordinates": [-77.0428, -12.0464] },
    "locationName": "Miraflores, Lima"
  },
  {
    "_id": "2", "incidentType": "lost", "status": "active",
    "petName": "Mauricio", "petType": "cat",
    "description": "Slipped out through an open window.",
    "imageUrls": [],
    "location": { "type": "Point", "coordinates": [-77.0400, -12.0470] },
    "locationName": "San Isidro, Lima"
  },
  {
    "_id": "3", "incidentType": "lost", "status": "active",
    "petName": "Raúl", "petType": "cat",
    "description": "Last seen on the rooftops.",
    "location": { "type": "Point", "coordinates": [-77.0428, -12.0505] },
    "locationName": "Barranco, Lima"
  },
  {
    "_id": "4", "incidentType": "lost", "status": "active",
    "petName": "Luna", "petType": "dog",
    "description": "Shy with strangers, pink collar.",
    "location": { "type": "Point", "coordinates": [-77.0350, -12.1050] }
  },
  {
    "_id": "5", "incidentType": "lost", "status": "active",
    "petName": "Simba", "petType": "cat",
    "location": { "type": "Point", "coordinates": [-77.0500, -12.0700] }
  },
  {
    "_id": "6", "incidentType": "lost", "status": "active",
    "petName": "Max", "petType": "dog",
    "location": { "type": "Point", "coordinates": [-77.0300, -12.0800] }
  },
  {
    "_id": "7", "incidentType": "lost", "status": "resolved",
    "petName": "Michi", "petType": "cat",
    "location": { "type": "Point", "coordinates": [-77.0428, -12.0464] }
  },
  {
    "_id": "a1", "incidentType": "adoption", "status": "active",
    "petName": "Charlie", "petType": "dog",
    "location": { "type": "Point", "coordinates": [-77.0428, -12.0464] }
  },
  {
    "_id": "8", "incidentType": "lost", "status": "active",
    "petName": "Toby", "petType": "dog",
    "description": "Reported without a location."
  }
]"#;
