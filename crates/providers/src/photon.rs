//! Photon geocoding backend (OpenStreetMap data).
//!
//! Serves both place search and free-text geocoding. Applies a regional
//! bias toward Indonesia to avoid ambiguous global matches.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use wayfinder_core::{config::ProvidersConfig, Error, Geocoder, Place, Result};

use crate::normalize::{normalize_photon_places, PhotonFeature};
use crate::pacer::Pacer;
use crate::transport::{build_http_client, map_status_error, map_transport_error};

// Jakarta bias and Indonesia bounding box (west, south, east, north).
const BIAS_LAT: f64 = -6.2;
const BIAS_LON: f64 = 106.8;
const INDONESIA_BBOX: &str = "95.0,-11.0,141.0,6.0";

pub struct PhotonGeocoder {
    http: reqwest::Client,
    base_url: String,
    pacer: Arc<Pacer>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

impl PhotonGeocoder {
    pub fn new(config: &ProvidersConfig, pacer: Arc<Pacer>) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: config.photon_base_url.clone(),
            pacer,
        })
    }
}

#[async_trait]
impl Geocoder for PhotonGeocoder {
    async fn search_places(&self, query: &str, location: &str, limit: u8) -> Result<Vec<Place>> {
        if query.trim().is_empty() {
            return Err(Error::invalid_intent("query must be provided"));
        }

        // Photon takes a single free-text query, so query and location are
        // combined textually.
        let search_text = format!("{query} {location}").trim().to_string();
        let limit = limit.to_string();
        let lat = BIAS_LAT.to_string();
        let lon = BIAS_LON.to_string();

        self.pacer.acquire().await;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", search_text.as_str()),
                ("limit", limit.as_str()),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("bbox", INDONESIA_BBOX),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error("photon", e))?
            .error_for_status()
            .map_err(|e| map_status_error("photon", e))?;

        let body: FeatureCollection = response
            .json()
            .await
            .map_err(|e| Error::unavailable(format!("photon returned unexpected payload: {e}")))?;

        let places = normalize_photon_places(&body.features);
        tracing::debug!(
            query = %search_text,
            raw = body.features.len(),
            normalized = places.len(),
            "Photon search complete"
        );

        Ok(places)
    }
}
