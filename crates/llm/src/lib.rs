#![deny(unused)]
//! Model backend client and intent resolution for Wayfinder.
//!
//! This crate turns free-form user messages into typed intents by prompting
//! a language-model backend and strictly validating its output.

pub mod client;
pub mod extract;
pub mod resolver;

pub use client::OllamaClient;
pub use resolver::IntentResolver;
