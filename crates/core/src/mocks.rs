//! Mock implementations of core traits for testing.
//!
//! These mocks record their calls so tests can assert how many outbound
//! requests a flow actually issued.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    error::{Error, Result},
    traits::{Geocoder, ModelBackend, RoutePlanner},
    types::{Coordinates, Place, Route},
};

// =============================================================================
// Mock Model Backend
// =============================================================================

/// Failure mode for the scripted model backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelFailure {
    None,
    Timeout,
    Unavailable,
}

/// Scripted mock model backend that returns predefined completions.
pub struct MockModelBackend {
    responses: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
    failure: ModelFailure,
}

impl MockModelBackend {
    /// Create a mock with a queue of completions, cycled when exhausted.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            failure: ModelFailure::None,
        }
    }

    /// Create a mock that always returns the same completion.
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock that fails every call with `UpstreamTimeout`.
    pub fn timing_out() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
            failure: ModelFailure::Timeout,
        }
    }

    /// Create a mock that fails every call with `UpstreamUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
            failure: ModelFailure::Unavailable,
        }
    }

    /// Number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ModelBackend for MockModelBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        match self.failure {
            ModelFailure::Timeout => {
                return Err(Error::timeout("mock model deadline elapsed"));
            }
            ModelFailure::Unavailable => {
                return Err(Error::unavailable("mock model connection refused"));
            }
            ModelFailure::None => {}
        }

        let responses = self.responses.lock().unwrap();
        let idx = (*count - 1) % responses.len().max(1);
        Ok(responses.get(idx).cloned().unwrap_or_default())
    }
}

// =============================================================================
// Mock Geocoder
// =============================================================================

/// Mock geocoding backend returning a fixed result set.
pub struct MockGeocoder {
    places: Vec<Place>,
    /// Search texts that deliberately return zero results.
    empty_for: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockGeocoder {
    /// Create a mock that returns `places` for every search.
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places,
            empty_for: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock with a single sample place.
    pub fn with_sample_place() -> Self {
        Self::new(vec![sample_place("Mock Ramen House", -6.2146, 106.8451)])
    }

    /// Return zero results for search texts containing `text`.
    pub fn empty_for(mut self, text: &str) -> Self {
        self.empty_for.push(text.to_string());
        self
    }

    /// Search texts this mock has seen, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn search_places(&self, query: &str, location: &str, limit: u8) -> Result<Vec<Place>> {
        let text = format!("{} {}", query, location).trim().to_string();
        self.calls.lock().unwrap().push(text.clone());

        if self.empty_for.iter().any(|t| text.contains(t.as_str())) {
            return Ok(Vec::new());
        }

        let mut places = self.places.clone();
        places.truncate(limit as usize);
        Ok(places)
    }
}

// =============================================================================
// Mock Route Planner
// =============================================================================

/// Mock routing backend returning a fixed route.
pub struct MockRoutePlanner {
    route: Option<Route>,
    calls: Mutex<Vec<(Coordinates, Coordinates)>>,
}

impl MockRoutePlanner {
    /// Create a mock that returns a sample route for every pair.
    pub fn with_sample_route() -> Self {
        Self {
            route: Some(sample_route()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that reports no route between any pair.
    pub fn without_route() -> Self {
        Self {
            route: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Coordinate pairs this mock has routed, in order.
    pub fn calls(&self) -> Vec<(Coordinates, Coordinates)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RoutePlanner for MockRoutePlanner {
    async fn get_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Route> {
        self.calls.lock().unwrap().push((origin, destination));

        self.route
            .clone()
            .ok_or_else(|| Error::no_route("mock backend reports no route"))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Build a normalized place fixture.
pub fn sample_place(name: &str, lat: f64, lon: f64) -> Place {
    Place {
        name: name.to_string(),
        lat,
        lon,
        address: name.to_string(),
        map_url: format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=18/{lat}/{lon}"
        ),
    }
}

/// Build a route fixture with a minimal LineString geometry.
pub fn sample_route() -> Route {
    Route {
        distance_meters: 3200.0,
        duration_seconds: 540.0,
        geometry: serde_json::json!({
            "type": "LineString",
            "coordinates": [[106.8451, -6.2146], [106.8227, -6.1754]],
        }),
    }
}
