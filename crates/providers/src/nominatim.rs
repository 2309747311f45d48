//! Nominatim geocoding backend.
//!
//! Alternative to Photon, selected by configuration. Nominatim's usage
//! policy is stricter, hence the longer default pacing interval.

use async_trait::async_trait;
use std::sync::Arc;

use wayfinder_core::{config::ProvidersConfig, Error, Geocoder, Place, Result};

use crate::normalize::{normalize_nominatim_places, NominatimRecord};
use crate::pacer::Pacer;
use crate::transport::{build_http_client, map_status_error, map_transport_error};

pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: String,
    pacer: Arc<Pacer>,
}

impl NominatimGeocoder {
    pub fn new(config: &ProvidersConfig, pacer: Arc<Pacer>) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: config.nominatim_base_url.clone(),
            pacer,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search_places(&self, query: &str, location: &str, limit: u8) -> Result<Vec<Place>> {
        if query.trim().is_empty() {
            return Err(Error::invalid_intent("query must be provided"));
        }

        let search_text = if location.trim().is_empty() {
            query.to_string()
        } else {
            format!("{query} in {location}")
        };
        let limit = limit.to_string();

        self.pacer.acquire().await;

        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", search_text.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error("nominatim", e))?
            .error_for_status()
            .map_err(|e| map_status_error("nominatim", e))?;

        let records: Vec<NominatimRecord> = response.json().await.map_err(|e| {
            Error::unavailable(format!("nominatim returned unexpected payload: {e}"))
        })?;

        let places = normalize_nominatim_places(&records);
        tracing::debug!(
            query = %search_text,
            raw = records.len(),
            normalized = places.len(),
            "Nominatim search complete"
        );

        Ok(places)
    }
}
