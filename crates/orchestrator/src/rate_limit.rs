//! Fixed-window caller rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Bounds how many requests an identity may issue in a trailing window.
///
/// Timestamps older than the window are dropped lazily on each check; an
/// identity's window state is owned exclusively by this instance. Two
/// independently configured instances exist in the gateway: one for chat
/// admission, one (stricter) for API-key provisioning.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    requests: Mutex<HashMap<String, Vec<Instant>>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Admit and record a request for `identity` iff it has capacity in the
    /// trailing window. Returns false without recording otherwise.
    pub fn allow(&self, identity: &str) -> bool {
        let now = Instant::now();
        let mut requests = self.requests.lock().unwrap();
        let stamps = requests.entry(identity.to_string()).or_default();

        stamps.retain(|t| now - *t < self.window);

        if stamps.len() >= self.max_requests as usize {
            tracing::debug!(identity, "Rate limit exceeded");
            return false;
        }

        stamps.push(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn allows_within_limit() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(5));

        assert!(limiter.allow("client1"));
        assert!(limiter.allow("client1"));
        assert!(limiter.allow("client1"));
    }

    #[tokio::test(start_paused = true)]
    async fn blocks_after_limit() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_secs(5));

        assert!(limiter.allow("client1"));
        assert!(limiter.allow("client1"));
        assert!(!limiter.allow("client1"));
    }

    #[tokio::test(start_paused = true)]
    async fn capacity_restores_after_window() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_secs(2));

        assert!(limiter.allow("client1"));
        assert!(limiter.allow("client1"));
        assert!(!limiter.allow("client1"));

        tokio::time::advance(Duration::from_millis(2100)).await;
        assert!(limiter.allow("client1"));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_calls_do_not_consume_capacity() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(2));

        assert!(limiter.allow("client1"));
        // Hammering while blocked must not extend the block.
        for _ in 0..5 {
            assert!(!limiter.allow("client1"));
        }

        tokio::time::advance(Duration::from_millis(2100)).await;
        assert!(limiter.allow("client1"));
    }

    #[tokio::test(start_paused = true)]
    async fn identities_are_isolated() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.allow("client1"));
        assert!(!limiter.allow("client1"));
        assert!(limiter.allow("client2"));
    }
}
