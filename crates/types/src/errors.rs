//! Error types for transport and adapter operations

use thiserror::Error;

/// Errors surfaced by the outbound transport and the adapter parsing layer.
///
/// None of these ever escape an adapter invocation: `call_endpoint` folds
/// them into the returned result.
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Network error: {0}")]
	Network(String),

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },
}

/// Result alias used across the transport and adapter layers.
pub type AdapterResult<T> = Result<T, AdapterError>;

impl AdapterError {
	/// Extract the HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error with the given status code and reason
	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatusError {
			status_code,
			reason: reason.into(),
		}
	}

	/// Create an HTTP failure error from a response status with a default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_code_extraction() {
		let error = AdapterError::HttpStatusError {
			status_code: 404,
			reason: "Not Found".to_string(),
		};
		assert_eq!(error.status_code(), Some(404));

		let error = AdapterError::http_failure(500, "Internal Server Error");
		assert_eq!(error.status_code(), Some(500));

		let error = AdapterError::InvalidResponse {
			reason: "bad response".to_string(),
		};
		assert_eq!(error.status_code(), None);
	}

	#[test]
	fn test_http_failure_status_message_mapping() {
		let error = AdapterError::from_http_failure(404);
		assert!(error.to_string().contains("404"));
		assert!(error.to_string().contains("Not Found"));

		let error = AdapterError::from_http_failure(429);
		assert!(error.to_string().contains("429"));
		assert!(error.to_string().contains("Too Many Requests"));

		let error = AdapterError::from_http_failure(567);
		assert!(error.to_string().contains("HTTP Error 567"));
	}
}
