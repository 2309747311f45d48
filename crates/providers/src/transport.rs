//! Shared HTTP plumbing for provider backends.

use std::time::Duration;

use wayfinder_core::{config::ProvidersConfig, Error, Result};

/// Build the reqwest client shared by a backend, with the configured
/// user agent and timeout.
pub(crate) fn build_http_client(config: &ProvidersConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| Error::internal(format!("failed to build provider HTTP client: {e}")))
}

/// Map a reqwest transport error to the core taxonomy.
pub(crate) fn map_transport_error(backend: &'static str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("{backend}: {e}"))
    } else {
        Error::unavailable(format!("{backend}: {e}"))
    }
}

/// Map a non-success HTTP status to the core taxonomy.
pub(crate) fn map_status_error(backend: &'static str, e: reqwest::Error) -> Error {
    Error::unavailable(format!(
        "{backend} returned status {}",
        e.status().map(|s| s.to_string()).unwrap_or_default()
    ))
}
