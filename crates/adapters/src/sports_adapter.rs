//! Champions League results adapter for the football-data endpoint

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

const ENDPOINT_NAME: &str = "SportsNewsEndpoint";
const BASE_URL: &str = "https://api.football-data.org/v4/competitions/CL/matches";
const NO_MATCHES_MESSAGE: &str = "No Champions League matches in the last 7 days.";

#[derive(Debug, Clone, Deserialize)]
struct MatchesResponse {
	#[serde(default)]
	matches: Vec<MatchFixture>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchFixture {
	utc_date: DateTime<Utc>,
	home_team: Team,
	away_team: Team,
	score: Score,
}

#[derive(Debug, Clone, Deserialize)]
struct Team {
	name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Score {
	full_time: FullTime,
}

#[derive(Debug, Clone, Deserialize)]
struct FullTime {
	home: Option<i64>,
	away: Option<i64>,
}

/// Adapter for finished Champions League matches.
///
/// Sorts by match date (a name sort has no matching data here and leaves
/// upstream order), filters on either team name, and renders one line per
/// matching fixture.
pub struct SportsAdapter {
	api_key: SecretString,
	cache: ResponseCache,
	stats: Arc<dyn StatisticsRecorder>,
}

impl SportsAdapter {
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
			"sports:{}:{}:{}",
			filter.sports_keyword.as_deref().unwrap_or_default(),
			sorting.sort_by,
			sorting.sort_order
		)
	}

	fn request(&self) -> AdapterResult<UpstreamRequest> {
		let url = Url::parse_with_params(BASE_URL, &[("season", "2025"), ("status", "FINISHED")])
			.map_err(|e| AdapterError::ConfigError {
				reason: format!("invalid sports URL: {e}"),
			})?;

		Ok(UpstreamRequest::get(url)
			.header("X-Auth-Token", self.api_key.expose_secret())
			.header("Accept", "application/json"))
	}

	fn score_text(score: Option<i64>) -> String {
		score.map(|s| s.to_string()).unwrap_or_default()
	}

	fn render(mut matches: Vec<MatchFixture>, filter: &FilterOptions, sorting: &SortingOptions) -> String {
		if sorting.sort_by == SortBy::Date {
			match sorting.sort_order {
				SortOrder::Asc => matches.sort_by(|a, b| a.utc_date.cmp(&b.utc_date)),
				SortOrder::Desc => matches.sort_by(|a, b| b.utc_date.cmp(&a.utc_date)),
			}
		}

		let keyword = filter
			.sports_keyword
			.as_deref()
			.unwrap_or_default()
			.to_lowercase();

		let mut body = String::from("Champions League Results (Last 7 Days):\n");
		for fixture in matches {
			if keyword.is_empty()
				|| fixture.home_team.name.to_lowercase().contains(&keyword)
				|| fixture.away_team.name.to_lowercase().contains(&keyword)
			{
				body.push_str(&format!(
					"{} - {} {} : {} {}\n",
					fixture.utc_date.format("%Y-%m-%d"),
					fixture.home_team.name,
					Self::score_text(fixture.score.full_time.home),
					Self::score_text(fixture.score.full_time.away),
					fixture.away_team.name
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

		let parsed: MatchesResponse = serde_json::from_str(&response.body)?;
		if parsed.matches.is_empty() {
			// informational no-data answer, intentionally not cached
			return Ok(EndpointResult::success(ENDPOINT_NAME, NO_MATCHES_MESSAGE));
		}

		let body = Self::render(parsed.matches, filter, sorting);
		let result = EndpointResult::success(ENDPOINT_NAME, body);
		self.cache.insert(cache_key, result.clone());
		Ok(result)
	}
}

#[async_trait]
impl EndpointAdapter for SportsAdapter {
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
