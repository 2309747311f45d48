use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
///
/// Provider payloads list coordinates in (longitude, latitude) order; this
/// type always carries them as (latitude, longitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A normalized place record, independent of which backend produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name, never empty (falls back to a placeholder).
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Comma-joined address, falling back to `name` when the provider
    /// supplies no address parts.
    pub address: String,
    /// Marker URL derived deterministically from the coordinates.
    pub map_url: String,
}

/// A normalized route between two coordinate pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// Opaque line-geometry payload (GeoJSON LineString) passed through
    /// from the routing backend.
    pub geometry: serde_json::Value,
}
