//! Uniform per-endpoint result shape

use serde::{Deserialize, Serialize};

/// Outcome of one adapter invocation.
///
/// Produced exactly once per adapter per aggregation call and immutable
/// afterwards. Failures travel inside `error_message`; an adapter never
/// surfaces an error any other way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResult {
	pub name: String,
	pub is_success: bool,
	pub response_body: String,
	pub error_message: String,
}

impl EndpointResult {
	/// Successful result carrying a rendered response body.
	pub fn success(name: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			is_success: true,
			response_body: body.into(),
			error_message: String::new(),
		}
	}

	/// Failed result carrying the cause text.
	pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			is_success: false,
			response_body: String::new(),
			error_message: error.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_success_and_failure_constructors() {
		let ok = EndpointResult::success("WeatherEndpoint", "sunny");
		assert!(ok.is_success);
		assert_eq!(ok.response_body, "sunny");
		assert!(ok.error_message.is_empty());

		let failed = EndpointResult::failure("WeatherEndpoint", "HTTP 500: Internal Server Error");
		assert!(!failed.is_success);
		assert!(failed.response_body.is_empty());
		assert_eq!(failed.error_message, "HTTP 500: Internal Server Error");
	}

	#[test]
	fn test_serializes_camel_case() {
		let result = EndpointResult::success("NewsEndpoint", "headline");
		let json = serde_json::to_string(&result).unwrap();
		assert!(json.contains("\"isSuccess\":true"));
		assert!(json.contains("\"responseBody\":\"headline\""));
		assert!(json.contains("\"errorMessage\":\"\""));
	}
}
