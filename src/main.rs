#![deny(unused)]
//! Wayfinder - intent-driven maps orchestration service.
//!
//! Classifies free-form messages into map intents with a local LLM, then
//! composes OpenStreetMap geocoding and routing backends behind a cached,
//! rate-limited HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wayfinder_core::config::AppConfig;
use wayfinder_gateway::GatewayServer;
use wayfinder_llm::{IntentResolver, OllamaClient};
use wayfinder_orchestrator::{Orchestrator, TtlCache};
use wayfinder_providers::OpenStreetMapProvider;

fn configure_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,wayfinder=debug".into()),
    );

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configure_tracing();

    tracing::info!("Starting Wayfinder v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;

    let model = Arc::new(OllamaClient::new(&config.llm)?);
    tracing::info!(
        endpoint = %config.llm.endpoint,
        model = %config.llm.model,
        "Model backend initialized"
    );

    let provider = Arc::new(OpenStreetMapProvider::from_config(&config.providers)?);
    tracing::info!(
        geocoder = %config.providers.geocoder,
        osrm = %config.providers.osrm_base_url,
        "Map providers initialized"
    );

    let orchestrator = Arc::new(Orchestrator::new(
        IntentResolver::new(model),
        provider,
        TtlCache::new(Duration::from_secs(config.cache.ttl_secs)),
    ));

    let server = GatewayServer::new(&config, orchestrator);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Gateway initialized"
    );

    server.run().await?;

    Ok(())
}
