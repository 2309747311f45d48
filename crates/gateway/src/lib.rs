#![deny(unused)]
//! HTTP gateway for Wayfinder: API key provisioning, caller admission, and
//! the chat endpoint in front of the orchestration driver.

pub mod api_keys;
pub mod server;

pub use api_keys::ApiKeyStore;
pub use server::GatewayServer;
