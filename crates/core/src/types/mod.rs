//! Shared data types for Wayfinder.

pub mod geo;
pub mod intent;
pub mod response;

pub use geo::{Coordinates, Place, Route};
pub use intent::{Intent, DEFAULT_PLACE_LIMIT, MAX_PLACE_LIMIT};
pub use response::ResultEnvelope;
