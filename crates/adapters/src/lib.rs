//! Aggregator Adapters
//!
//! One adapter per external API, each conforming to the
//! [`EndpointAdapter`](agg_types::EndpointAdapter) contract. Every adapter
//! follows the same shape: deterministic cache key, cache lookup, one timed
//! GET through the shared resilience-wrapped transport, fallback-sentinel
//! short-circuit, vendor-specific parse/sort/filter/render, and caching of
//! the successful result. Failures never escape an adapter; they are folded
//! into the returned result.

pub mod news_adapter;
pub mod sports_adapter;
pub mod weather_adapter;

mod fetch;

pub use news_adapter::NewsAdapter;
pub use sports_adapter::SportsAdapter;
pub use weather_adapter::WeatherAdapter;

#[cfg(test)]
pub(crate) mod test_util;
