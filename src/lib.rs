//! API Aggregator Library
//!
//! A resilient fan-out aggregator over third-party HTTP APIs (weather, news,
//! sports results): concurrent multi-endpoint invocation, per-endpoint
//! response caching, a shared timeout/retry/fallback pipeline on every
//! outbound call, and thread-safe usage statistics.
//!
//! The crate is the core consumed by an external routing layer: build an
//! [`AggregatorService`] with [`AggregatorBuilder`], call
//! [`AggregatorService::aggregate`] and [`AggregatorService::statistics`].

// Core domain types - the most commonly used types
pub use agg_types::{
	AdapterError,
	AdapterResult,
	// Capability and transport seams
	EndpointAdapter,
	// Primary domain entities
	EndpointResult,
	EndpointStats,
	EndpointUsage,
	FilterOptions,
	SecretString,
	SortBy,
	SortOrder,
	SortingOptions,
	StatisticsAccumulator,
	StatisticsRecorder,
	Transport,
};

// Service layer
pub use agg_service::{AggregatorService, HttpTransport, ResiliencePipeline};

// Storage layer
pub use agg_storage::ResponseCache;

// Adapters
pub use agg_adapters::{NewsAdapter, SportsAdapter, WeatherAdapter};

// Config
pub use agg_config::{load_config, Settings};

// Module aliases for advanced usage
pub mod types {
	pub use agg_types::*;
}

pub mod storage {
	pub use agg_storage::*;
}

pub mod config {
	pub use agg_config::*;
}

pub mod adapters {
	pub use agg_adapters::*;
}

pub mod service {
	pub use agg_service::*;
}

pub mod mocks;

use std::sync::Arc;
use tracing::info;

/// Errors raised while assembling the aggregator
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[from] reqwest::Error),

	#[error("failed to resolve endpoint credentials: {0}")]
	Credentials(#[from] agg_config::ConfigurableValueError),
}

/// Builder wiring settings, cache, statistics, the resilience pipeline and
/// the fixed adapter set into an [`AggregatorService`].
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	adapters: Vec<Arc<dyn EndpointAdapter>>,
	transport: Option<Arc<dyn Transport>>,
}

impl AggregatorBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use explicit settings instead of the defaults.
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Register a custom adapter. Supplying any custom adapter replaces the
	/// stock weather/news/sports set.
	pub fn with_adapter(mut self, adapter: Arc<dyn EndpointAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Replace the outbound transport. Mainly a test seam; the default is
	/// the resilience pipeline over a pooled HTTP client.
	pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Assemble the aggregator service.
	pub fn build(self) -> Result<AggregatorService, BuildError> {
		let settings = self.settings.unwrap_or_default();
		let stats = Arc::new(StatisticsAccumulator::new());

		let transport = match self.transport {
			Some(transport) => transport,
			None => {
				let client = HttpTransport::shared_client()?;
				ResiliencePipeline::for_client(client, &settings.resilience)
			},
		};

		let adapters = if self.adapters.is_empty() {
			stock_adapters(&settings, Arc::clone(&stats))?
		} else {
			self.adapters
		};

		info!("aggregator assembled with {} endpoints", adapters.len());
		Ok(AggregatorService::new(adapters, transport, stats))
	}
}

/// The fixed adapter set, all sharing one response cache and one statistics
/// store.
fn stock_adapters(
	settings: &Settings,
	stats: Arc<StatisticsAccumulator>,
) -> Result<Vec<Arc<dyn EndpointAdapter>>, BuildError> {
	let cache = ResponseCache::with_ttl(settings.cache.ttl());
	let endpoints = &settings.endpoints;

	let recorder: Arc<dyn StatisticsRecorder> = stats;
	Ok(vec![
		Arc::new(WeatherAdapter::new(
			endpoints.weather_api_key.resolve_for_secret()?,
			cache.clone(),
			Arc::clone(&recorder),
		)),
		Arc::new(NewsAdapter::new(
			endpoints.news_api_key.resolve_for_secret()?,
			cache.clone(),
			Arc::clone(&recorder),
		)),
		Arc::new(SportsAdapter::new(
			endpoints.sports_api_key.resolve_for_secret()?,
			cache,
			recorder,
		)),
	])
}
