//! In-memory API key issuance and verification.
//!
//! Keys live for the process lifetime only. Plaintext keys are returned to
//! the caller exactly once at issuance; only a sha256 digest is retained.

use dashmap::DashMap;
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Prefix on every issued key, so leaked keys are recognizable in logs and
/// scanners.
pub const KEY_PREFIX: &str = "way_live_";

const KEY_RANDOM_LEN: usize = 32;

/// Process-local API key store.
///
/// One active key per owner email: issuing again revokes the previous key.
pub struct ApiKeyStore {
    /// sha256 hex digest -> owner email.
    keys: DashMap<String, String>,
    /// owner email -> digest of the currently active key.
    owners: DashMap<String, String>,
}

impl ApiKeyStore {
    pub fn new() -> Self {
        Self {
            keys: DashMap::new(),
            owners: DashMap::new(),
        }
    }

    /// Issue a fresh key for `email`, revoking any key previously issued to
    /// the same owner. Returns the plaintext key.
    pub fn issue(&self, email: &str) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(KEY_RANDOM_LEN)
            .map(char::from)
            .collect();
        let key = format!("{KEY_PREFIX}{token}");
        let digest = digest_hex(&key);

        if let Some(previous) = self.owners.insert(email.to_string(), digest.clone()) {
            self.keys.remove(&previous);
        }
        self.keys.insert(digest, email.to_string());

        key
    }

    /// Resolve a presented key to its owner. None for unknown or revoked
    /// keys.
    pub fn verify(&self, key: &str) -> Option<String> {
        self.keys.get(&digest_hex(key)).map(|owner| owner.clone())
    }
}

impl Default for ApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn digest_hex(key: &str) -> String {
    format!("{:x}", Sha256::digest(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_key_carries_prefix_and_verifies() {
        let store = ApiKeyStore::new();
        let key = store.issue("dev@example.com");

        assert!(key.starts_with(KEY_PREFIX));
        assert_eq!(store.verify(&key), Some("dev@example.com".to_string()));
    }

    #[test]
    fn unknown_key_does_not_verify() {
        let store = ApiKeyStore::new();
        store.issue("dev@example.com");

        assert_eq!(store.verify("way_live_notarealkey"), None);
    }

    #[test]
    fn reissuing_revokes_the_previous_key() {
        let store = ApiKeyStore::new();
        let first = store.issue("dev@example.com");
        let second = store.issue("dev@example.com");

        assert_ne!(first, second);
        assert_eq!(store.verify(&first), None);
        assert_eq!(store.verify(&second), Some("dev@example.com".to_string()));
    }

    #[test]
    fn owners_are_independent() {
        let store = ApiKeyStore::new();
        let alpha = store.issue("alpha@example.com");
        let beta = store.issue("beta@example.com");

        assert_eq!(store.verify(&alpha), Some("alpha@example.com".to_string()));
        assert_eq!(store.verify(&beta), Some("beta@example.com".to_string()));
    }
}
