//! Per-endpoint usage statistics
//!
//! Snapshot models plus the concurrency-safe accumulator shared by every
//! adapter. The map is lock-striped and each endpoint carries its own atomic
//! counters, so unrelated endpoints never serialize against each other.

use dashmap::DashMap;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Accumulated usage of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStats {
	pub call_count: u64,
	pub total_elapsed_time_ms: u64,
}

impl EndpointStats {
	/// Mean latency in milliseconds, 0 when nothing was recorded yet.
	pub fn average_time_ms(&self) -> f64 {
		if self.call_count == 0 {
			0.0
		} else {
			self.total_elapsed_time_ms as f64 / self.call_count as f64
		}
	}

	/// Coarse latency classification. The fast boundary is exclusive: an
	/// average of exactly 100ms is "average", exactly 3500ms is "slow".
	pub fn performance_bracket(&self) -> &'static str {
		let average = self.average_time_ms();
		if average < 100.0 {
			"fast"
		} else if average < 3500.0 {
			"average"
		} else {
			"slow"
		}
	}

	/// Projection exposed to statistics-endpoint callers.
	pub fn usage_report(&self) -> EndpointUsage {
		EndpointUsage {
			call_count: self.call_count,
			performance: self.performance_bracket(),
		}
	}
}

/// Caller-facing statistics entry: call volume plus the latency bracket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUsage {
	pub call_count: u64,
	pub performance: &'static str,
}

/// Recording seam between adapters and the statistics store.
#[cfg_attr(test, mockall::automock)]
pub trait StatisticsRecorder: Send + Sync {
	/// Record one completed upstream call for `endpoint`.
	fn record(&self, endpoint: &str, elapsed_ms: u64);

	/// Current per-endpoint statistics. Each key's pair reflects a
	/// serializable history of `record` calls for that key; no cross-key
	/// atomicity is promised.
	fn snapshot(&self) -> HashMap<String, EndpointStats>;
}

#[derive(Debug, Default)]
struct EndpointCounters {
	call_count: AtomicU64,
	total_elapsed_ms: AtomicU64,
}

/// Concurrency-safe statistics store, one counter pair per endpoint name,
/// created lazily on first record.
#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
	stats: DashMap<String, Arc<EndpointCounters>>,
}

impl StatisticsAccumulator {
	pub fn new() -> Self {
		Self::default()
	}
}

impl StatisticsRecorder for StatisticsAccumulator {
	fn record(&self, endpoint: &str, elapsed_ms: u64) {
		let counters = Arc::clone(self.stats.entry(endpoint.to_string()).or_default().value());
		// Two independent atomics: neither field can lose an update, the
		// pair is not required to move as one transaction.
		counters.call_count.fetch_add(1, Ordering::Relaxed);
		counters.total_elapsed_ms.fetch_add(elapsed_ms, Ordering::Relaxed);
	}

	fn snapshot(&self) -> HashMap<String, EndpointStats> {
		self.stats
			.iter()
			.map(|entry| {
				let counters = entry.value();
				(
					entry.key().clone(),
					EndpointStats {
						call_count: counters.call_count.load(Ordering::Relaxed),
						total_elapsed_time_ms: counters.total_elapsed_ms.load(Ordering::Relaxed),
					},
				)
			})
			.collect()
	}
}
