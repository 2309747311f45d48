//! Outbound rate governor: minimum spacing between calls to one backend.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum inter-request interval for a single external backend.
///
/// One instance exists per backend (geocoder, router). The lock is held
/// across the check-sleep-stamp sequence, so concurrent acquirers are
/// serialized and can never both observe a stale last-call time.
pub struct Pacer {
    min_interval: Duration,
    last_permit: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_permit: Mutex::new(None),
        }
    }

    /// Suspend until `min_interval` has elapsed since the last permitted
    /// call, then record the new timestamp and return.
    pub async fn acquire(&self) {
        let mut last = self.last_permit.lock().await;

        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::trace!(wait_ms = wait.as_millis() as u64, "Pacing outbound call");
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let pacer = Pacer::new(Duration::from_secs(1));
        let before = Instant::now();
        pacer.acquire().await;
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn second_acquire_waits_out_the_interval() {
        let pacer = Pacer::new(Duration::from_secs(1));

        pacer.acquire().await;
        let first = Instant::now();
        pacer.acquire().await;

        assert!(Instant::now() - first >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_acquirers_never_violate_the_interval() {
        let min_interval = Duration::from_millis(500);
        let pacer = Arc::new(Pacer::new(min_interval));
        let permits = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let pacer = pacer.clone();
            let permits = permits.clone();
            handles.push(tokio::spawn(async move {
                pacer.acquire().await;
                permits.lock().unwrap().push(Instant::now());
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut stamps = permits.lock().unwrap().clone();
        stamps.sort();
        assert_eq!(stamps.len(), 8);
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= min_interval);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn interval_already_elapsed_means_no_wait() {
        let pacer = Pacer::new(Duration::from_secs(1));

        pacer.acquire().await;
        tokio::time::sleep(Duration::from_secs(2)).await;

        let before = Instant::now();
        pacer.acquire().await;
        assert_eq!(Instant::now(), before);
    }
}
