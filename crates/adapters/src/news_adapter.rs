//! Top-headlines adapter for the NewsAPI endpoint

use crate::fetch::timed_get;
use agg_types::{
	fallback_message, AdapterError, AdapterResult, EndpointAdapter, EndpointResult, FilterOptions,
	SecretString, SortBy, SortOrder, SortingOptions, StatisticsRecorder, Transport,
	UpstreamRequest,
};
use agg_storage::ResponseCache;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const ENDPOINT_NAME: &str = "NewsEndpoint";
const BASE_URL: &str = "https://newsapi.org/v2/top-headlines";
const USER_AGENT: &str = "api-aggregator/0.1";
const NOT_FOUND_MESSAGE: &str = "News articles not found!";

#[derive(Debug, Clone, Deserialize)]
struct NewsResponse {
	articles: Option<Vec<Article>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
	title: String,
	#[serde(default)]
	description: Option<String>,
	published_at: DateTime<Utc>,
}

/// Adapter for US business top headlines.
///
/// Sorts by publication date or title, filters on case-insensitive title
/// containment, and renders one text block per matching article.
pub struct NewsAdapter {
	api_key: SecretString,
	cache: ResponseCache,
	stats: Arc<dyn StatisticsRecorder>,
}

impl NewsAdapter {
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

	fn cache_key(filter: &FilterOptions, sorting: &SortingOptions) -> String {
		format!(
			"news:{}:{}:{}",
			filter.news_keyword.as_deref().unwrap_or_default(),
			sorting.sort_by,
			sorting.sort_order
		)
	}

	fn request(&self) -> AdapterResult<UpstreamRequest> {
		let url = Url::parse_with_params(
			BASE_URL,
			&[
				("country", "us"),
				("category", "business"),
				("apiKey", self.api_key.expose_secret()),
			],
		)
		.map_err(|e| AdapterError::ConfigError {
			reason: format!("invalid news URL: {e}"),
		})?;

		Ok(UpstreamRequest::get(url).header("User-Agent", USER_AGENT))
	}

	fn render(mut articles: Vec<Article>, filter: &FilterOptions, sorting: &SortingOptions) -> String {
		// Vec::sort_by is stable, so equal keys keep their upstream order in
		// both directions.
		match sorting.sort_by {
			SortBy::Date => match sorting.sort_order {
				SortOrder::Asc => articles.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
				SortOrder::Desc => articles.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
			},
			SortBy::Name => match sorting.sort_order {
				SortOrder::Asc => articles.sort_by(|a, b| a.title.cmp(&b.title)),
				SortOrder::Desc => articles.sort_by(|a, b| b.title.cmp(&a.title)),
			},
		}

		let keyword = filter
			.news_keyword
			.as_deref()
			.unwrap_or_default()
			.to_lowercase();

		let mut body = String::new();
		for article in articles {
			if keyword.is_empty() || article.title.to_lowercase().contains(&keyword) {
				body.push_str(&format!("Published At: {}\n", article.published_at));
				body.push_str(&format!("Title: {}\n", article.title));
				body.push_str(&format!(
					"Description: {}\n",
					article.description.unwrap_or_default()
				));
			}
		}
		body
	}

	async fn fetch(
		&self,
		transport: Arc<dyn Transport>,
		filter: &FilterOptions,
		sorting: &SortingOptions,
		cache_key: &str,
	) -> AdapterResult<EndpointResult> {
		let response = timed_get(&transport, self.request()?, ENDPOINT_NAME, &self.stats).await?;

		if let Some(message) = fallback_message(&response.body) {
			return Ok(EndpointResult::success(ENDPOINT_NAME, message));
		}

		let parsed: NewsResponse = serde_json::from_str(&response.body)?;
		let body = match parsed.articles {
			Some(articles) if !articles.is_empty() => Self::render(articles, filter, sorting),
			_ => format!("{}\n", NOT_FOUND_MESSAGE),
		};

		let result = EndpointResult::success(ENDPOINT_NAME, body);
		self.cache.insert(cache_key, result.clone());
		Ok(result)
	}
}

#[async_trait]
impl EndpointAdapter for NewsAdapter {
	fn endpoint_name(&self) -> &str {
		ENDPOINT_NAME
	}

	async fn call_endpoint(
		&self,
		transport: Arc<dyn Transport>,
		filter: &FilterOptions,
		sorting: &SortingOptions,
	) -> EndpointResult {
		let cache_key = Self::cache_key(filter, sorting);
		if let Some(cached) = self.cache.get(&cache_key) {
			debug!("{} served from cache", ENDPOINT_NAME);
			return cached;
		}

		match self.fetch(transport, filter, sorting, &cache_key).await {
			Ok(result) => result,
			Err(e) => EndpointResult::failure(ENDPOINT_NAME, e.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_util::{accumulator, call, call_with, MockRecorder, StubTransport};

	const BODY: &str = r#"{
		"status": "ok",
		"totalResults": 3,
		"articles": [
			{"title": "Markets rally on tech earnings", "description": "Solid quarter", "publishedAt": "2025-05-02T08:00:00Z"},
			{"title": "Airline merger approved", "description": "Deal closes", "publishedAt": "2025-05-01T12:00:00Z"},
			{"title": "Tech layoffs continue", "description": null, "publishedAt": "2025-05-03T09:30:00Z"}
		]
	}"#;

	fn adapter(stats: Arc<dyn StatisticsRecorder>) -> NewsAdapter {
		NewsAdapter::new(SecretString::from("fake-key"), ResponseCache::new(), stats)
	}

	#[tokio::test]
	async fn test_null_articles_render_not_found() {
		let adapter = adapter(accumulator());
		let transport = StubTransport::ok(r#"{"articles":null}"#);

		let result = call(&adapter, &transport).await;

		assert!(result.is_success);
		assert!(result.response_body.contains("News articles not found!"));
	}

	#[tokio::test]
	async fn test_empty_articles_render_not_found() {
		let adapter = adapter(accumulator());
		let transport = StubTransport::ok(r#"{"articles":[]}"#);

		let result = call(&adapter, &transport).await;

		assert!(result.is_success);
		assert!(result.response_body.contains("News articles not found!"));
	}

	#[tokio::test]
	async fn test_sorts_by_date_ascending() {
		let adapter = adapter(accumulator());
		let transport = StubTransport::ok(BODY);

		let result = call(&adapter, &transport).await;

		let merger = result.response_body.find("Airline merger approved").unwrap();
		let rally = result.response_body.find("Markets rally").unwrap();
		let layoffs = result.response_body.find("Tech layoffs").unwrap();
		assert!(merger < rally && rally < layoffs);
	}

	#[tokio::test]
	async fn test_sorts_by_title_descending() {
		let adapter = adapter(accumulator());
		let transport = StubTransport::ok(BODY);
		let sorting = SortingOptions {
			sort_by: SortBy::Name,
			sort_order: SortOrder::Desc,
		};

		let result = call_with(&adapter, &transport, &FilterOptions::default(), &sorting).await;

		let layoffs = result.response_body.find("Tech layoffs").unwrap();
		let rally = result.response_body.find("Markets rally").unwrap();
		let merger = result.response_body.find("Airline merger").unwrap();
		assert!(layoffs < rally && rally < merger);
	}

	#[tokio::test]
	async fn test_filters_titles_case_insensitively() {
		let adapter = adapter(accumulator());
		let transport = StubTransport::ok(BODY);
		let filter = FilterOptions {
			news_keyword: Some("TECH".to_string()),
			sports_keyword: None,
		};

		let result = call_with(&adapter, &transport, &filter, &SortingOptions::default()).await;

		assert!(result.response_body.contains("Markets rally on tech earnings"));
		assert!(result.response_body.contains("Tech layoffs continue"));
		assert!(!result.response_body.contains("Airline merger"));
	}

	#[tokio::test]
	async fn test_records_latency_once_per_upstream_call() {
		let mut recorder = MockRecorder::new();
		recorder
			.expect_record()
			.withf(|endpoint, _| endpoint == "NewsEndpoint")
			.times(1)
			.returning(|_, _| ());
		let adapter = adapter(Arc::new(recorder));
		let transport = StubTransport::ok(BODY);

		// second call hits the cache and must not record again
		call(&adapter, &transport).await;
		call(&adapter, &transport).await;
		assert_eq!(transport.calls(), 1);
	}

	#[tokio::test]
	async fn test_fallback_sentinel_is_surfaced_verbatim() {
		let adapter = adapter(accumulator());
		let transport =
			StubTransport::ok(r#"{"source":"PollyFallback","message":"Fallback triggered"}"#);

		let result = call(&adapter, &transport).await;

		assert!(result.is_success);
		assert_eq!(result.response_body, "Fallback triggered");
	}

	#[tokio::test]
	async fn test_persistent_500_is_a_failure_and_never_cached() {
		let stats = accumulator();
		let adapter = adapter(stats.clone());
		let transport = StubTransport::status(500, "upstream exploded");

		let result = call(&adapter, &transport).await;
		assert!(!result.is_success);
		assert!(!result.error_message.is_empty());
		assert!(stats.snapshot().is_empty());

		call(&adapter, &transport).await;
		assert_eq!(transport.calls(), 2);
	}

	#[tokio::test]
	async fn test_distinct_options_use_distinct_cache_entries() {
		let adapter = adapter(accumulator());
		let transport = StubTransport::ok(BODY);

		call(&adapter, &transport).await;
		let filter = FilterOptions {
			news_keyword: Some("tech".to_string()),
			sports_keyword: None,
		};
		call_with(&adapter, &transport, &filter, &SortingOptions::default()).await;

		assert_eq!(transport.calls(), 2);
	}
}
