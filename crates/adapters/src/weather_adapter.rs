//! Current-weather adapter for the OpenWeatherMap endpoint

use crate::fetch::timed_get;
use agg_types::{
	fallback_message, AdapterError, AdapterResult, EndpointAdapter, EndpointResult, FilterOptions,
	SecretString, SortingOptions, StatisticsRecorder, Transport, UpstreamRequest,
};
use agg_storage::ResponseCache;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const ENDPOINT_NAME: &str = "WeatherEndpoint";
const BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather/";
const CACHE_KEY: &str = "weather";

#[derive(Debug, Clone, Deserialize)]
struct WeatherResponse {
	weather: Vec<WeatherCondition>,
	main: MainReadings,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherCondition {
	description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MainReadings {
	temp: f64,
}

/// Adapter for current weather in Athens.
///
/// Filter and sorting fields have no matching data here and are ignored, so
/// one global cache key covers the call.
pub struct WeatherAdapter {
	api_key: SecretString,
	cache: ResponseCache,
	stats: Arc<dyn StatisticsRecorder>,
}

impl WeatherAdapter {
	pub fn new(
		api_key: SecretString,
		cache: ResponseCache,
		stats: Arc<dyn StatisticsRecorder>,
	) -> Self {
		Self {
			api_key,
			cache,
			stats,
		}
	}

	fn request(&self) -> AdapterResult<UpstreamRequest> {
		let url = Url::parse_with_params(
			BASE_URL,
			&[
				("q", "Athens"),
				("units", "metric"),
				("appid", self.api_key.expose_secret()),
			],
		)
		.map_err(|e| AdapterError::ConfigError {
			reason: format!("invalid weather URL: {e}"),
		})?;

		Ok(UpstreamRequest::get(url))
	}

	async fn fetch(&self, transport: Arc<dyn Transport>) -> AdapterResult<EndpointResult> {
		let response = timed_get(&transport, self.request()?, ENDPOINT_NAME, &self.stats).await?;

		if let Some(message) = fallback_message(&response.body) {
			return Ok(EndpointResult::success(ENDPOINT_NAME, message));
		}

		let parsed: WeatherResponse = serde_json::from_str(&response.body)?;
		let condition = parsed
			.weather
			.first()
			.ok_or_else(|| AdapterError::InvalidResponse {
				reason: "weather response carries no conditions".to_string(),
			})?;
		let body = format!(
			"Weather in Athens: {}, Temperature: {:.2} °C",
			condition.description, parsed.main.temp
		);

		let result = EndpointResult::success(ENDPOINT_NAME, body);
		self.cache.insert(CACHE_KEY, result.clone());
		Ok(result)
	}
}

#[async_trait]
impl EndpointAdapter for WeatherAdapter {
	fn endpoint_name(&self) -> &str {
		ENDPOINT_NAME
	}

	async fn call_endpoint(
		&self,
		transport: Arc<dyn Transport>,
		_filter: &FilterOptions,
		_sorting: &SortingOptions,
	) -> EndpointResult {
		if let Some(cached) = self.cache.get(CACHE_KEY) {
			debug!("{} served from cache", ENDPOINT_NAME);
			return cached;
		}

		match self.fetch(transport).await {
			Ok(result) => result,
			Err(e) => EndpointResult::failure(ENDPOINT_NAME, e.to_string()),
		}
	}
}
