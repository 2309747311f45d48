//! Provider facade composing a geocoding backend with a routing backend.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use wayfinder_core::{
    config::ProvidersConfig, Coordinates, Error, Geocoder, MapProvider, Place, Result, Route,
    RoutePlanner,
};

use crate::nominatim::NominatimGeocoder;
use crate::osrm::OsrmRouter;
use crate::pacer::Pacer;
use crate::photon::PhotonGeocoder;

/// Composite provider: Photon or Nominatim for place search and geocoding,
/// OSRM for routing. The single seam through which both backends are
/// invoked; each backend's pacer gates every call made through here.
pub struct OpenStreetMapProvider {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RoutePlanner>,
}

impl std::fmt::Debug for OpenStreetMapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenStreetMapProvider").finish_non_exhaustive()
    }
}

impl OpenStreetMapProvider {
    pub fn new(geocoder: Arc<dyn Geocoder>, router: Arc<dyn RoutePlanner>) -> Self {
        Self { geocoder, router }
    }

    /// Build the facade from configuration, selecting the geocoding backend
    /// and wiring one pacer per external backend.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let geocoder_pacer = Arc::new(Pacer::new(Duration::from_millis(
            config.geocoder_min_interval_ms,
        )));
        let router_pacer = Arc::new(Pacer::new(Duration::from_millis(
            config.router_min_interval_ms,
        )));

        let geocoder: Arc<dyn Geocoder> = match config.geocoder.as_str() {
            "photon" => Arc::new(PhotonGeocoder::new(config, geocoder_pacer)?),
            "nominatim" => Arc::new(NominatimGeocoder::new(config, geocoder_pacer)?),
            other => {
                return Err(Error::config(format!(
                    "unknown geocoder backend '{other}' (expected 'photon' or 'nominatim')"
                )))
            }
        };

        let router = Arc::new(OsrmRouter::new(config, router_pacer)?);

        Ok(Self::new(geocoder, router))
    }
}

#[async_trait]
impl MapProvider for OpenStreetMapProvider {
    async fn search_places(&self, query: &str, location: &str, limit: u8) -> Result<Vec<Place>> {
        self.geocoder.search_places(query, location, limit).await
    }

    async fn geocode(&self, text: &str) -> Result<Coordinates> {
        let results = self.geocoder.search_places(text, "", 1).await?;

        let first = results
            .first()
            .ok_or_else(|| Error::geocode_failed(text))?;

        Ok(Coordinates::new(first.lat, first.lon))
    }

    async fn get_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Route> {
        self.router.get_directions(origin, destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::mocks::{MockGeocoder, MockRoutePlanner};

    #[tokio::test]
    async fn geocode_takes_first_result_coordinates() {
        let facade = OpenStreetMapProvider::new(
            Arc::new(MockGeocoder::with_sample_place()),
            Arc::new(MockRoutePlanner::with_sample_route()),
        );

        let coords = facade.geocode("Sudirman Jakarta").await.unwrap();
        assert_eq!(coords, Coordinates::new(-6.2146, 106.8451));
    }

    #[tokio::test]
    async fn geocode_with_zero_results_fails() {
        let geocoder = Arc::new(MockGeocoder::with_sample_place().empty_for("Atlantis"));
        let facade =
            OpenStreetMapProvider::new(geocoder, Arc::new(MockRoutePlanner::with_sample_route()));

        let err = facade.geocode("Atlantis").await.unwrap_err();
        assert!(matches!(err, Error::GeocodeFailed(_)));
    }

    #[tokio::test]
    async fn search_places_passes_through_to_geocoder() {
        let geocoder = Arc::new(MockGeocoder::with_sample_place());
        let facade = OpenStreetMapProvider::new(
            geocoder.clone(),
            Arc::new(MockRoutePlanner::with_sample_route()),
        );

        let places = facade.search_places("ramen", "Jakarta", 5).await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(geocoder.calls(), vec!["ramen Jakarta".to_string()]);
    }

    #[tokio::test]
    async fn unknown_geocoder_kind_is_a_config_error() {
        let mut config = wayfinder_core::config::AppConfig::default().providers;
        config.geocoder = "google".to_string();

        let err = OpenStreetMapProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
