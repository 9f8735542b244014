//! Aggregator Storage
//!
//! In-memory keyed TTL cache for endpoint results.

pub mod response_cache;

pub use response_cache::{ResponseCache, DEFAULT_TTL};
