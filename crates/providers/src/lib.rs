#![deny(unused)]
//! Geocoding and routing backends for Wayfinder.
//!
//! Concrete backends (Photon, Nominatim, OSRM) normalize their raw response
//! shapes at the boundary and share a per-backend pacer that enforces each
//! upstream's usage policy.

pub mod facade;
pub mod nominatim;
pub mod normalize;
pub mod osrm;
pub mod pacer;
pub mod photon;
mod transport;

pub use facade::OpenStreetMapProvider;
pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmRouter;
pub use pacer::Pacer;
pub use photon::PhotonGeocoder;
