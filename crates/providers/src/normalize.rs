//! Result normalization: provider response shapes -> canonical `Place`.
//!
//! Pure functions, one per provider shape. Records with unusable geometry
//! are silently dropped; partial result sets are acceptable.

use serde::Deserialize;

use wayfinder_core::Place;

/// Literal used when a provider supplies no usable name at all.
pub const PLACEHOLDER_NAME: &str = "Unknown place";

/// One GeoJSON feature as returned by Photon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotonFeature {
    #[serde(default)]
    pub properties: PhotonProperties,
    #[serde(default)]
    pub geometry: PhotonGeometry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotonProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotonGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// One flat record as returned by Nominatim's search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimRecord {
    #[serde(default)]
    pub display_name: Option<String>,
    /// Nominatim serializes coordinates as strings.
    pub lat: String,
    pub lon: String,
}

/// Deterministic marker URL for a coordinate pair.
pub fn map_url(lat: f64, lon: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=18/{lat}/{lon}")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Normalize Photon GeoJSON features.
///
/// Name preference: name, else street, else city, else a placeholder.
/// Address is the comma-joined non-empty subset of {street, city, country},
/// falling back to the resolved name.
pub fn normalize_photon_places(features: &[PhotonFeature]) -> Vec<Place> {
    features
        .iter()
        .filter_map(|feature| {
            // Geometry must be exactly a (lon, lat) pair; anything else is dropped.
            let &[lon, lat] = feature.geometry.coordinates.as_slice() else {
                return None;
            };

            let props = &feature.properties;
            let name = non_empty(&props.name)
                .or_else(|| non_empty(&props.street))
                .or_else(|| non_empty(&props.city))
                .unwrap_or(PLACEHOLDER_NAME)
                .to_string();

            let address_parts: Vec<&str> = [&props.street, &props.city, &props.country]
                .into_iter()
                .filter_map(non_empty)
                .collect();
            let address = if address_parts.is_empty() {
                name.clone()
            } else {
                address_parts.join(", ")
            };

            Some(Place {
                map_url: map_url(lat, lon),
                name,
                lat,
                lon,
                address,
            })
        })
        .collect()
}

/// Normalize flat Nominatim records.
///
/// Records whose stringly coordinates do not parse are dropped.
pub fn normalize_nominatim_places(records: &[NominatimRecord]) -> Vec<Place> {
    records
        .iter()
        .filter_map(|record| {
            let lat: f64 = record.lat.parse().ok()?;
            let lon: f64 = record.lon.parse().ok()?;

            let name = non_empty(&record.display_name)
                .unwrap_or(PLACEHOLDER_NAME)
                .to_string();

            Some(Place {
                map_url: map_url(lat, lon),
                address: name.clone(),
                name,
                lat,
                lon,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(
        name: Option<&str>,
        street: Option<&str>,
        city: Option<&str>,
        country: Option<&str>,
        coordinates: Vec<f64>,
    ) -> PhotonFeature {
        PhotonFeature {
            properties: PhotonProperties {
                name: name.map(String::from),
                street: street.map(String::from),
                city: city.map(String::from),
                country: country.map(String::from),
            },
            geometry: PhotonGeometry { coordinates },
        }
    }

    #[test]
    fn photon_feature_normalizes_with_lat_lon_swap() {
        let places = normalize_photon_places(&[feature(
            Some("Warung Ramen"),
            Some("Jl. Sudirman"),
            Some("Jakarta"),
            Some("Indonesia"),
            vec![106.8451, -6.2146],
        )]);

        assert_eq!(places.len(), 1);
        let place = &places[0];
        assert_eq!(place.name, "Warung Ramen");
        assert_eq!(place.lat, -6.2146);
        assert_eq!(place.lon, 106.8451);
        assert_eq!(place.address, "Jl. Sudirman, Jakarta, Indonesia");
        assert!(place.map_url.contains("mlat=-6.2146"));
        assert!(place.map_url.contains("mlon=106.8451"));
    }

    #[test]
    fn bad_geometry_is_dropped_without_error() {
        let places = normalize_photon_places(&[
            feature(Some("three"), None, None, None, vec![1.0, 2.0, 3.0]),
            feature(Some("zero"), None, None, None, vec![]),
            feature(Some("ok"), None, None, None, vec![106.8, -6.2]),
        ]);

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "ok");
    }

    #[test]
    fn name_falls_back_through_street_and_city() {
        let by_street = normalize_photon_places(&[feature(
            None,
            Some("Jl. Thamrin"),
            None,
            None,
            vec![106.8, -6.2],
        )]);
        assert_eq!(by_street[0].name, "Jl. Thamrin");

        let by_city =
            normalize_photon_places(&[feature(None, None, Some("Jakarta"), None, vec![106.8, -6.2])]);
        assert_eq!(by_city[0].name, "Jakarta");

        let placeholder =
            normalize_photon_places(&[feature(None, None, None, None, vec![106.8, -6.2])]);
        assert_eq!(placeholder[0].name, PLACEHOLDER_NAME);
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let places = normalize_photon_places(&[feature(
            Some("  "),
            Some(""),
            Some("Jakarta"),
            None,
            vec![106.8, -6.2],
        )]);

        assert_eq!(places[0].name, "Jakarta");
        assert_eq!(places[0].address, "Jakarta");
    }

    #[test]
    fn address_falls_back_to_name_when_no_parts() {
        let places =
            normalize_photon_places(&[feature(Some("Monas"), None, None, None, vec![106.8, -6.2])]);
        assert_eq!(places[0].address, "Monas");
    }

    #[test]
    fn nominatim_records_parse_stringly_coordinates() {
        let places = normalize_nominatim_places(&[NominatimRecord {
            display_name: Some("Monas, Gambir, Jakarta".to_string()),
            lat: "-6.1754".to_string(),
            lon: "106.8227".to_string(),
        }]);

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].lat, -6.1754);
        assert_eq!(places[0].address, "Monas, Gambir, Jakarta");
    }

    #[test]
    fn nominatim_unparsable_coordinates_are_dropped() {
        let places = normalize_nominatim_places(&[NominatimRecord {
            display_name: Some("bad".to_string()),
            lat: "not-a-number".to_string(),
            lon: "106.8".to_string(),
        }]);

        assert!(places.is_empty());
    }
}
