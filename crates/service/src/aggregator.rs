//! Core aggregation service logic

use agg_types::{
	EndpointAdapter, EndpointResult, EndpointStats, FilterOptions, SortingOptions,
	StatisticsAccumulator, StatisticsRecorder, Transport,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Service fanning out one concurrent call per configured endpoint adapter
/// and joining all results.
pub struct AggregatorService {
	adapters: Vec<Arc<dyn EndpointAdapter>>,
	transport: Arc<dyn Transport>,
	stats: Arc<StatisticsAccumulator>,
}

impl AggregatorService {
	pub fn new(
		adapters: Vec<Arc<dyn EndpointAdapter>>,
		transport: Arc<dyn Transport>,
		stats: Arc<StatisticsAccumulator>,
	) -> Self {
		Self {
			adapters,
			transport,
			stats,
		}
	}

	/// Invoke every adapter concurrently and collect one result per adapter,
	/// in no particular order.
	///
	/// Adapter failures travel inside the per-endpoint results; a panicked
	/// task is folded into a failure entry for its endpoint. The aggregate
	/// call itself only completes once every adapter has produced a result.
	pub async fn aggregate(
		&self,
		filter: &FilterOptions,
		sorting: &SortingOptions,
	) -> Vec<EndpointResult> {
		info!("aggregating {} endpoints", self.adapters.len());

		let names: Vec<String> = self
			.adapters
			.iter()
			.map(|adapter| adapter.endpoint_name().to_string())
			.collect();

		let tasks = self.adapters.iter().map(|adapter| {
			let adapter = Arc::clone(adapter);
			let transport = Arc::clone(&self.transport);
			let filter = filter.clone();
			let sorting = sorting.clone();

			tokio::spawn(async move {
				debug!("invoking {}", adapter.endpoint_name());
				adapter.call_endpoint(transport, &filter, &sorting).await
			})
		});

		let joined = join_all(tasks).await;

		let results: Vec<EndpointResult> = joined
			.into_iter()
			.zip(names)
			.map(|(outcome, name)| match outcome {
				Ok(result) => result,
				Err(e) => {
					warn!("adapter task for {} did not complete: {}", name, e);
					EndpointResult::failure(name, format!("adapter task failed: {e}"))
				},
			})
			.collect();

		info!(
			"aggregation completed: {} of {} endpoints succeeded",
			results.iter().filter(|r| r.is_success).count(),
			results.len()
		);

		results
	}

	/// Read-only snapshot of per-endpoint usage statistics.
	pub fn statistics(&self) -> HashMap<String, EndpointStats> {
		self.stats.snapshot()
	}

	/// Number of configured endpoint adapters.
	pub fn endpoint_count(&self) -> usize {
		self.adapters.len()
	}
}
