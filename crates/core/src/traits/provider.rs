//! Geocoding and routing backend traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Coordinates, Place, Route};

/// A place-search / geocoding backend.
///
/// Implementations normalize their raw response shape into `Place` records
/// at this boundary, so callers never see provider-specific payloads.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Search for places matching `query` near `location`.
    ///
    /// `location` may be empty when the query text already carries the
    /// locality (geocoding mode). Partial result sets are acceptable;
    /// records with unusable geometry are dropped, not errors.
    async fn search_places(&self, query: &str, location: &str, limit: u8) -> Result<Vec<Place>>;
}

/// A routing backend.
#[async_trait]
pub trait RoutePlanner: Send + Sync {
    /// Compute the best route between two coordinate pairs.
    ///
    /// Fails with `NoRouteFound` when the backend reports that no route
    /// exists between the pairs.
    async fn get_directions(&self, origin: Coordinates, destination: Coordinates)
        -> Result<Route>;
}

/// The uniform capability surface the orchestration driver depends on.
///
/// Composes a geocoding backend and a routing backend, hiding which
/// concrete backend serves each capability.
#[async_trait]
pub trait MapProvider: Send + Sync {
    async fn search_places(&self, query: &str, location: &str, limit: u8) -> Result<Vec<Place>>;

    /// Resolve free text to a coordinate pair.
    ///
    /// Fails with `GeocodeFailed` when the search returns zero results.
    async fn geocode(&self, text: &str) -> Result<Coordinates>;

    async fn get_directions(&self, origin: Coordinates, destination: Coordinates)
        -> Result<Route>;
}
