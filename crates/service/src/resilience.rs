//! Composable HTTP resilience pipeline: timeout, retry, fallback
//!
//! Each policy is an explicit decorator over the [`Transport`] trait holding
//! the next stage, so the composition order is visible where the pipeline is
//! assembled and every stage can be exercised in isolation against a stub
//! next stage. The pipeline is built once and shared by all adapters; it
//! carries no per-endpoint state.

use agg_config::ResilienceSettings;
use agg_types::{
	AdapterError, AdapterResult, FallbackPayload, Transport, UpstreamRequest, UpstreamResponse,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Innermost stage: one GET per invocation over the shared connection pool.
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	pub fn new(client: reqwest::Client) -> Self {
		Self { client }
	}

	/// Pooled client tuned identically for every adapter.
	pub fn shared_client() -> reqwest::Result<reqwest::Client> {
		reqwest::Client::builder()
			.pool_max_idle_per_host(10)
			.pool_idle_timeout(Duration::from_secs(90))
			.tcp_keepalive(Duration::from_secs(60))
			.build()
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn get(&self, request: &UpstreamRequest) -> AdapterResult<UpstreamResponse> {
		let mut builder = self.client.get(&request.url);
		for (name, value) in &request.headers {
			builder = builder.header(name, value);
		}

		let response = builder.send().await?;
		let status = response.status().as_u16();
		let body = response.text().await?;

		Ok(UpstreamResponse::with_status(status, body))
	}
}

/// Cancels an individual attempt once it exceeds the configured budget.
pub struct TimeoutStage {
	inner: Arc<dyn Transport>,
	timeout: Duration,
}

impl TimeoutStage {
	pub fn new(inner: Arc<dyn Transport>, timeout: Duration) -> Self {
		Self { inner, timeout }
	}
}

#[async_trait]
impl Transport for TimeoutStage {
	async fn get(&self, request: &UpstreamRequest) -> AdapterResult<UpstreamResponse> {
		match tokio::time::timeout(self.timeout, self.inner.get(request)).await {
			Ok(result) => result,
			Err(_) => {
				warn!("attempt to {} timed out after {:?}", request.url, self.timeout);
				Err(AdapterError::Timeout {
					timeout_ms: self.timeout.as_millis() as u64,
				})
			},
		}
	}
}

/// Retries transient failures with exponential backoff.
///
/// The delay before retry `n` is `2^n` seconds. Non-transient statuses pass
/// through untouched; an exhausted transient failure surfaces as an error so
/// the fallback stage can take over.
pub struct RetryStage {
	inner: Arc<dyn Transport>,
	max_retries: u32,
}

impl RetryStage {
	pub fn new(inner: Arc<dyn Transport>, max_retries: u32) -> Self {
		Self { inner, max_retries }
	}
}

/// Transient failures worth another attempt: 5xx, request timeout, and
/// rate limiting. Any other 4xx is final.
fn is_transient_status(status: u16) -> bool {
	status >= 500 || status == 408 || status == 429
}

#[async_trait]
impl Transport for RetryStage {
	async fn get(&self, request: &UpstreamRequest) -> AdapterResult<UpstreamResponse> {
		let mut attempt = 0u32;
		loop {
			let failure = match self.inner.get(request).await {
				Ok(response) if !is_transient_status(response.status) => return Ok(response),
				Ok(response) => AdapterError::from_http_failure(response.status),
				Err(e) => e,
			};

			if attempt >= self.max_retries {
				warn!(
					"giving up on {} after {} attempts: {}",
					request.url,
					attempt + 1,
					failure
				);
				return Err(failure);
			}

			attempt += 1;
			let delay = Duration::from_secs(2u64.pow(attempt));
			debug!(
				"transient failure for {} ({}), retry {} in {:?}",
				request.url, failure, attempt, delay
			);
			tokio::time::sleep(delay).await;
		}
	}
}

/// Substitutes a degraded-success sentinel when the inner chain gives up,
/// so callers see "unavailable" rather than a hard failure.
pub struct FallbackStage {
	inner: Arc<dyn Transport>,
}

impl FallbackStage {
	pub fn new(inner: Arc<dyn Transport>) -> Self {
		Self { inner }
	}
}

#[async_trait]
impl Transport for FallbackStage {
	async fn get(&self, request: &UpstreamRequest) -> AdapterResult<UpstreamResponse> {
		match self.inner.get(request).await {
			Ok(response) => Ok(response),
			Err(e) => {
				warn!("fallback engaged for {}: {}", request.url, e);
				Ok(FallbackPayload::unavailable().into_response())
			},
		}
	}
}

/// Assembles the shared pipeline in its fixed order:
/// timeout, then retry, then fallback, innermost first.
pub struct ResiliencePipeline;

impl ResiliencePipeline {
	/// Wrap an existing transport. This is the seam tests use to run the
	/// pipeline over a scripted inner stage.
	pub fn wrap(inner: Arc<dyn Transport>, settings: &ResilienceSettings) -> Arc<dyn Transport> {
		let timeout = TimeoutStage::new(inner, settings.attempt_timeout());
		let retry = RetryStage::new(Arc::new(timeout), settings.max_retries);
		if settings.fallback_enabled {
			Arc::new(FallbackStage::new(Arc::new(retry)))
		} else {
			Arc::new(retry)
		}
	}

	/// Build the production pipeline over a pooled HTTP client.
	pub fn for_client(
		client: reqwest::Client,
		settings: &ResilienceSettings,
	) -> Arc<dyn Transport> {
		Self::wrap(Arc::new(HttpTransport::new(client)), settings)
	}
}
