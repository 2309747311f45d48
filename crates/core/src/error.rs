//! Error types for Wayfinder.

use thiserror::Error;

/// Result type alias using Wayfinder's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Wayfinder.
///
/// Every failure the orchestration core can produce surfaces as one of
/// these variants; the HTTP layer translates them into status codes.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Client-caused errors (not retryable)
    // =========================================================================
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Model output schema violation: {0}")]
    SchemaViolation(String),

    #[error("Unsupported intent: {0}")]
    UnsupportedIntent(String),

    // =========================================================================
    // Backend failures (model, geocoder, router)
    // =========================================================================
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    // =========================================================================
    // Backend responded but produced no usable result
    // =========================================================================
    #[error("Could not geocode location: {0}")]
    GeocodeFailed(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    // =========================================================================
    // Generic errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid intent error.
    pub fn invalid_intent(msg: impl Into<String>) -> Self {
        Self::InvalidIntent(msg.into())
    }

    /// Create a malformed model output error.
    pub fn malformed_output(msg: impl Into<String>) -> Self {
        Self::MalformedModelOutput(msg.into())
    }

    /// Create a schema violation error.
    pub fn schema_violation(msg: impl Into<String>) -> Self {
        Self::SchemaViolation(msg.into())
    }

    /// Create an unsupported intent error.
    pub fn unsupported_intent(msg: impl Into<String>) -> Self {
        Self::UnsupportedIntent(msg.into())
    }

    /// Create an upstream timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::UpstreamTimeout(msg.into())
    }

    /// Create an upstream unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    /// Create a geocode failure error.
    pub fn geocode_failed(text: impl Into<String>) -> Self {
        Self::GeocodeFailed(text.into())
    }

    /// Create a no-route error.
    pub fn no_route(msg: impl Into<String>) -> Self {
        Self::NoRouteFound(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
