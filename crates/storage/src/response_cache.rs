//! Keyed TTL cache for endpoint results using DashMap
//!
//! Expiry is passive on read; a background sweep can additionally drop
//! expired entries. A stale entry is never returned once its TTL elapsed.

use agg_types::EndpointResult;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::debug;

/// Default time-to-live for cached endpoint results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Cached result with its write timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedResult {
	result: EndpointResult,
	stored_at: Instant,
}

impl CachedResult {
	fn new(result: EndpointResult) -> Self {
		Self {
			result,
			stored_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.stored_at.elapsed() > ttl
	}
}

/// Thread-safe keyed cache with TTL. Clones share the same underlying map,
/// so one cache instance can back every adapter.
#[derive(Debug, Clone)]
pub struct ResponseCache {
	entries: Arc<DashMap<String, CachedResult>>,
	ttl: Duration,
}

impl ResponseCache {
	/// Create a cache with the default 15-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(DEFAULT_TTL)
	}

	/// Create a cache with a custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			entries: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Look up a cached result. Expired entries are removed atomically and
	/// never returned.
	pub fn get(&self, key: &str) -> Option<EndpointResult> {
		self.entries.remove_if(key, |_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				debug!(
					"cache entry for {} expired (age: {:?})",
					key,
					cached.stored_at.elapsed()
				);
			}
			expired
		});

		self.entries.get(key).map(|entry| entry.value().result.clone())
	}

	/// Store a result under `key` with the cache's TTL.
	pub fn insert(&self, key: impl Into<String>, result: EndpointResult) {
		self.entries.insert(key.into(), CachedResult::new(result));
	}

	/// Remove all expired entries, returning how many were dropped.
	pub fn cleanup_expired(&self) -> usize {
		let mut removed_count = 0;
		self.entries.retain(|_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				removed_count += 1;
			}
			!expired
		});
		removed_count
	}

	/// Spawn a background sweep dropping expired entries once a minute.
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		let cache = self.clone();
		tokio::spawn(async move {
			let mut cleanup_interval = interval(Duration::from_secs(60));
			loop {
				cleanup_interval.tick().await;
				let removed = cache.cleanup_expired();
				if removed > 0 {
					debug!("swept {} expired cache entries", removed);
				}
			}
		})
	}

	/// Get the configured TTL duration
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Clear the cache (useful for testing)
	pub fn clear(&self) {
		self.entries.clear();
	}
}

impl Default for ResponseCache {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_result() -> EndpointResult {
		EndpointResult::success("WeatherEndpoint", "Weather in Athens: clear sky")
	}

	#[test]
	fn test_insert_then_get() {
		let cache = ResponseCache::new();
		cache.insert("weather", sample_result());

		let cached = cache.get("weather").unwrap();
		assert_eq!(cached, sample_result());
		assert!(cache.get("news:tech:date:asc").is_none());
	}

	#[tokio::test]
	async fn test_expired_entries_are_never_returned() {
		let cache = ResponseCache::with_ttl(Duration::from_millis(50));
		cache.insert("weather", sample_result());
		assert!(cache.get("weather").is_some());

		tokio::time::sleep(Duration::from_millis(100)).await;

		assert!(cache.get("weather").is_none());
		// the expired entry was removed on read
		assert!(cache.is_empty());
	}

	#[test]
	fn test_clones_share_the_map() {
		let cache1 = ResponseCache::new();
		let cache2 = cache1.clone();

		cache1.insert("weather", sample_result());
		assert!(cache2.get("weather").is_some());
	}

	#[tokio::test]
	async fn test_cleanup_expired_counts_removals() {
		let cache = ResponseCache::with_ttl(Duration::from_millis(50));
		cache.insert("a", sample_result());
		cache.insert("b", sample_result());

		assert_eq!(cache.cleanup_expired(), 0);
		tokio::time::sleep(Duration::from_millis(100)).await;
		assert_eq!(cache.cleanup_expired(), 2);
		assert!(cache.is_empty());
	}

	#[tokio::test]
	async fn test_background_sweep_drops_expired_entries() {
		let cache = ResponseCache::with_ttl(Duration::from_millis(50));
		cache.insert("weather", sample_result());
		tokio::time::sleep(Duration::from_millis(100)).await;

		// the sweep's first tick fires immediately
		let handle = cache.start_ttl_cleanup();
		tokio::time::sleep(Duration::from_millis(50)).await;

		assert!(cache.is_empty());
		handle.abort();
	}

	#[tokio::test]
	async fn test_concurrent_writers_and_readers() {
		let cache = Arc::new(ResponseCache::new());

		let mut handles = Vec::new();
		for i in 0..10 {
			let cache = Arc::clone(&cache);
			handles.push(tokio::spawn(async move {
				let key = format!("endpoint:{}", i % 3);
				cache.insert(key.clone(), sample_result());
				cache.get(&key)
			}));
		}

		for handle in handles {
			// a read immediately after a write must see a complete entry
			assert_eq!(handle.await.unwrap().unwrap(), sample_result());
		}
		assert_eq!(cache.len(), 3);
	}
}
