//! Configuration settings structures

use crate::configurable_value::ConfigurableValue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub endpoints: EndpointSettings,
	pub resilience: ResilienceSettings,
	pub cache: CacheSettings,
}

/// Vendor credentials, one opaque key per upstream API.
///
/// The core performs no validation on resolved keys; an empty key is still
/// sent and the vendor's rejection surfaces as a per-endpoint failure.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EndpointSettings {
	pub weather_api_key: ConfigurableValue,
	pub news_api_key: ConfigurableValue,
	pub sports_api_key: ConfigurableValue,
}

impl Default for EndpointSettings {
	fn default() -> Self {
		Self {
			weather_api_key: ConfigurableValue::from_plain(""),
			news_api_key: ConfigurableValue::from_plain(""),
			sports_api_key: ConfigurableValue::from_plain(""),
		}
	}
}

/// Resilience pipeline tuning, shared by every outbound call.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ResilienceSettings {
	/// Per-attempt timeout in seconds
	pub attempt_timeout_secs: u64,
	/// Additional attempts after the first on transient failures
	pub max_retries: u32,
	/// Substitute a degraded-success sentinel once the inner chain gives up
	pub fallback_enabled: bool,
}

impl Default for ResilienceSettings {
	fn default() -> Self {
		Self {
			attempt_timeout_secs: 10,
			max_retries: 3,
			fallback_enabled: true,
		}
	}
}

impl ResilienceSettings {
	pub fn attempt_timeout(&self) -> Duration {
		Duration::from_secs(self.attempt_timeout_secs)
	}
}

/// Response cache tuning.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
	/// Time-to-live of cached endpoint results in minutes
	pub ttl_minutes: u64,
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self { ttl_minutes: 15 }
	}
}

impl CacheSettings {
	pub fn ttl(&self) -> Duration {
		Duration::from_secs(self.ttl_minutes * 60)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_match_documented_policy() {
		let settings = Settings::default();
		assert_eq!(settings.resilience.attempt_timeout_secs, 10);
		assert_eq!(settings.resilience.max_retries, 3);
		assert!(settings.resilience.fallback_enabled);
		assert_eq!(settings.cache.ttl(), Duration::from_secs(15 * 60));
	}

	#[test]
	fn test_partial_config_fills_defaults() {
		let settings: Settings = serde_json::from_str(
			r#"{"resilience":{"max_retries":1},"endpoints":{"news_api_key":{"type":"env","value":"NEWS_API_KEY"}}}"#,
		)
		.unwrap();
		assert_eq!(settings.resilience.max_retries, 1);
		assert_eq!(settings.resilience.attempt_timeout_secs, 10);
		assert_eq!(settings.endpoints.news_api_key.value, "NEWS_API_KEY");
		assert_eq!(settings.cache.ttl_minutes, 15);
	}
}
