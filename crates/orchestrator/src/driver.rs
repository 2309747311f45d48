//! Orchestration driver: per-request sequencing over resolver, cache, and
//! provider facade.

use std::sync::Arc;

use wayfinder_core::{Error, Intent, MapProvider, Result, ResultEnvelope};
use wayfinder_llm::IntentResolver;

use crate::cache::TtlCache;

/// Longest accepted user message, in bytes.
const MAX_MESSAGE_LENGTH: usize = 500;

/// Drives a single request from raw message to result envelope.
///
/// All collaborators are injected at construction and owned for the process
/// lifetime; there is no module-level shared state.
pub struct Orchestrator {
    resolver: IntentResolver,
    provider: Arc<dyn MapProvider>,
    cache: TtlCache<ResultEnvelope>,
}

fn normalize_param(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Cache key for place searches. Parameter values are trimmed and
/// case-folded so equivalent requests collapse to one key.
fn places_cache_key(query: &str, location: &str, limit: u8) -> String {
    format!(
        "find_places|{}|{}|{limit}",
        normalize_param(query),
        normalize_param(location)
    )
}

fn directions_cache_key(origin: &str, destination: &str) -> String {
    format!(
        "get_directions|{}|{}",
        normalize_param(origin),
        normalize_param(destination)
    )
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Orchestrator {
    pub fn new(
        resolver: IntentResolver,
        provider: Arc<dyn MapProvider>,
        cache: TtlCache<ResultEnvelope>,
    ) -> Self {
        Self {
            resolver,
            provider,
            cache,
        }
    }

    /// Handle one caller message: resolve the intent, then dispatch.
    pub async fn handle(&self, message: &str) -> Result<ResultEnvelope> {
        if message.trim().is_empty() {
            return Err(Error::invalid_intent("message must not be empty"));
        }
        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(Error::invalid_intent(format!(
                "message exceeds {MAX_MESSAGE_LENGTH} characters"
            )));
        }

        let intent = self.resolver.resolve(message).await?;
        self.dispatch(intent).await
    }

    /// Dispatch a resolved intent to its flow.
    pub async fn dispatch(&self, intent: Intent) -> Result<ResultEnvelope> {
        match intent {
            Intent::FindPlaces {
                query,
                location,
                limit,
            } => self.find_places(&query, &location, limit).await,
            Intent::GetDirections {
                origin,
                destination,
            } => self.get_directions(&origin, &destination).await,
        }
    }

    async fn find_places(&self, query: &str, location: &str, limit: u8) -> Result<ResultEnvelope> {
        if query.trim().is_empty() || location.trim().is_empty() {
            return Err(Error::invalid_intent("missing query or location"));
        }

        let key = places_cache_key(query, location, limit);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Cache hit (places)");
            return Ok(cached);
        }

        let places = self.provider.search_places(query, location, limit).await?;

        let envelope = ResultEnvelope::FindPlaces {
            summary: format!("{} places near {location}", title_case(query)),
            places,
        };

        // Only successful resolutions are cached.
        self.cache.set(key, envelope.clone());
        Ok(envelope)
    }

    async fn get_directions(&self, origin: &str, destination: &str) -> Result<ResultEnvelope> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(Error::invalid_intent("missing origin or destination"));
        }

        let key = directions_cache_key(origin, destination);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Cache hit (directions)");
            return Ok(cached);
        }

        // Both endpoints are geocoded before any failure propagates, so the
        // destination lookup is never skipped; routing only runs once both
        // succeeded.
        let origin_coords = self.provider.geocode(origin).await;
        let destination_coords = self.provider.geocode(destination).await;
        let (origin_coords, destination_coords) = (origin_coords?, destination_coords?);

        let route = self
            .provider
            .get_directions(origin_coords, destination_coords)
            .await?;

        let envelope = ResultEnvelope::GetDirections {
            summary: format!("Directions from {origin} to {destination}"),
            route,
        };

        self.cache.set(key, envelope.clone());
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_collapse_case_and_whitespace() {
        assert_eq!(
            places_cache_key("  Ramen ", "SUDIRMAN Jakarta", 5),
            places_cache_key("ramen", "sudirman jakarta", 5),
        );
        assert_eq!(
            directions_cache_key(" Monas", "Sudirman "),
            directions_cache_key("monas", "sudirman"),
        );
    }

    #[test]
    fn cache_keys_distinguish_limit() {
        assert_ne!(
            places_cache_key("ramen", "jakarta", 5),
            places_cache_key("ramen", "jakarta", 6),
        );
    }

    #[test]
    fn title_case_capitalizes_words() {
        assert_eq!(title_case("ramen"), "Ramen");
        assert_eq!(title_case("nasi  goreng"), "Nasi Goreng");
        assert_eq!(title_case(""), "");
    }
}
