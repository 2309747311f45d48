//! Core trait seams for Wayfinder.
//!
//! Traits are organized by layer:
//! - `llm`: model backend (ModelBackend)
//! - `provider`: geocoding/routing backends and the facade contract
//!   (Geocoder, RoutePlanner, MapProvider)

pub mod llm;
pub mod provider;

pub use llm::*;
pub use provider::*;
