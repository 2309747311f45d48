//! OSRM routing backend.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use wayfinder_core::{config::ProvidersConfig, Coordinates, Error, Result, Route, RoutePlanner};

use crate::pacer::Pacer;
use crate::transport::{build_http_client, map_status_error, map_transport_error};

pub struct OsrmRouter {
    http: reqwest::Client,
    base_url: String,
    pacer: Arc<Pacer>,
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: serde_json::Value,
}

impl OsrmRouter {
    pub fn new(config: &ProvidersConfig, pacer: Arc<Pacer>) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: config.osrm_base_url.clone(),
            pacer,
        })
    }
}

#[async_trait]
impl RoutePlanner for OsrmRouter {
    async fn get_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Route> {
        // OSRM addresses coordinates in (lon, lat) order.
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, origin.lon, origin.lat, destination.lon, destination.lat
        );

        self.pacer.acquire().await;

        let response = self
            .http
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await
            .map_err(|e| map_transport_error("osrm", e))?
            .error_for_status()
            .map_err(|e| map_status_error("osrm", e))?;

        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|e| Error::unavailable(format!("osrm returned unexpected payload: {e}")))?;

        if body.code != "Ok" {
            return Err(Error::no_route(format!("osrm reported '{}'", body.code)));
        }

        // OSRM orders routes best-first; the first one is always used.
        let best = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_route("osrm returned zero routes"))?;

        tracing::debug!(
            distance_m = best.distance,
            duration_s = best.duration,
            "OSRM route computed"
        );

        Ok(Route {
            distance_meters: best.distance,
            duration_seconds: best.duration,
            geometry: best.geometry,
        })
    }
}
