//! Model backend trait.

use async_trait::async_trait;

use crate::error::Result;

/// A language-model backend that turns a prompt into a single completion.
///
/// Implementations must respect a bounded deadline and map transport
/// failures to `UpstreamTimeout` / `UpstreamUnavailable`.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
