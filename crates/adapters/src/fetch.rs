//! Shared timed fetch through the resilience-wrapped transport

use agg_types::{
	AdapterError, AdapterResult, StatisticsRecorder, Transport, UpstreamRequest, UpstreamResponse,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Issue one GET and record its wall-clock latency.
///
/// Latency measurement is anchored around the transport call only: an
/// attempt that completes with a success status (including a handled
/// fallback) is recorded exactly once; an attempt that errors or comes back
/// non-2xx is not recorded.
pub(crate) async fn timed_get(
	transport: &Arc<dyn Transport>,
	request: UpstreamRequest,
	endpoint: &str,
	stats: &Arc<dyn StatisticsRecorder>,
) -> AdapterResult<UpstreamResponse> {
	let started = Instant::now();
	let response = transport.get(&request).await?;
	let elapsed_ms = started.elapsed().as_millis() as u64;

	if !response.is_success() {
		return Err(AdapterError::from_http_failure(response.status));
	}

	stats.record(endpoint, elapsed_ms);
	debug!("{} answered {} in {}ms", endpoint, response.status, elapsed_ms);
	Ok(response)
}
