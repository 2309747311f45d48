#![deny(unused)]
//! Intent-driven orchestration for Wayfinder.
//!
//! Sequences the intent resolver, provider facade, response cache, and rate
//! limiting into one request pipeline.

pub mod cache;
pub mod driver;
pub mod rate_limit;

pub use cache::TtlCache;
pub use driver::Orchestrator;
pub use rate_limit::FixedWindowLimiter;
