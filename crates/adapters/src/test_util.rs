//! Shared stubs for adapter tests

use agg_types::{
	AdapterError, AdapterResult, EndpointAdapter, EndpointResult, EndpointStats, FilterOptions,
	SortingOptions, StatisticsAccumulator, StatisticsRecorder, Transport, UpstreamRequest,
	UpstreamResponse,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) fn accumulator() -> Arc<StatisticsAccumulator> {
	Arc::new(StatisticsAccumulator::new())
}

/// Scripted transport: serves queued replies in order, repeating the last
/// one, and counts every invocation.
pub(crate) struct StubTransport {
	replies: Mutex<Vec<Result<UpstreamResponse, String>>>,
	calls: AtomicUsize,
}

impl StubTransport {
	pub fn with_replies(replies: Vec<Result<UpstreamResponse, String>>) -> Arc<Self> {
		Arc::new(Self {
			replies: Mutex::new(replies),
			calls: AtomicUsize::new(0),
		})
	}

	pub fn ok(body: &str) -> Arc<Self> {
		Self::with_replies(vec![Ok(UpstreamResponse::ok(body))])
	}

	pub fn status(status: u16, body: &str) -> Arc<Self> {
		Self::with_replies(vec![Ok(UpstreamResponse::with_status(status, body))])
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Transport for StubTransport {
	async fn get(&self, _request: &UpstreamRequest) -> AdapterResult<UpstreamResponse> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let mut replies = self.replies.lock().unwrap();
		let reply = if replies.len() > 1 {
			replies.remove(0)
		} else {
			replies[0].clone()
		};
		reply.map_err(AdapterError::Network)
	}
}

mockall::mock! {
	pub Recorder {}

	impl StatisticsRecorder for Recorder {
		fn record(&self, endpoint: &str, elapsed_ms: u64);
		fn snapshot(&self) -> HashMap<String, EndpointStats>;
	}
}

/// Invoke an adapter with default filter and sorting.
pub(crate) async fn call(
	adapter: &dyn EndpointAdapter,
	transport: &Arc<StubTransport>,
) -> EndpointResult {
	call_with(
		adapter,
		transport,
		&FilterOptions::default(),
		&SortingOptions::default(),
	)
	.await
}

/// Invoke an adapter with explicit filter and sorting.
pub(crate) async fn call_with(
	adapter: &dyn EndpointAdapter,
	transport: &Arc<StubTransport>,
	filter: &FilterOptions,
	sorting: &SortingOptions,
) -> EndpointResult {
	let transport: Arc<dyn Transport> = Arc::clone(transport) as Arc<dyn Transport>;
	adapter.call_endpoint(transport, filter, sorting).await
}
