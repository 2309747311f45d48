//! Time-boxed response cache.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// In-memory cache with a fixed per-instance TTL.
///
/// Keys are strings built from normalized intent parameters. Expiry is
/// checked at read time and expired entries are evicted on access; there is
/// no background sweep. Safe for concurrent get/set from in-flight requests.
/// Concurrent misses for the same key are not de-duplicated.
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up `key`, evicting it when its TTL has elapsed.
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Store `value` under `key` with the instance TTL, overwriting any
    /// previous entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Number of entries currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn get_returns_stored_value_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("find_places|ramen|jakarta|5", "hit".to_string());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("find_places|ramen|jakarta|5"), Some("hit".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_absent_and_evicted() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("key", 1u32);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("key"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn set_after_expiry_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.set("key", 1u32);

        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get("key"), None);

        cache.set("key", 2u32);
        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_key_is_absent() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(10));
        assert_eq!(cache.get("missing"), None);
    }
}
