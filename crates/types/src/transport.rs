//! Outbound transport contract and the fallback sentinel payload

use crate::errors::AdapterResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker embedded in synthetic fallback responses so adapters can tell a
/// degraded-but-available answer apart from a real vendor payload.
pub const FALLBACK_SOURCE: &str = "PollyFallback";

/// Human-readable body of the synthetic fallback response.
pub const FALLBACK_MESSAGE: &str = "Service is currently unavailable. Please try again later.";

/// One outbound GET: target URL plus the vendor-required headers.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
	pub url: String,
	pub headers: Vec<(String, String)>,
}

impl UpstreamRequest {
	pub fn get(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			headers: Vec::new(),
		}
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		self.headers.push((name.to_string(), value.to_string()));
		self
	}
}

/// Status and body of an upstream response as seen past the resilience
/// pipeline.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
	pub status: u16,
	pub body: String,
}

impl UpstreamResponse {
	pub fn ok(body: impl Into<String>) -> Self {
		Self::with_status(200, body)
	}

	pub fn with_status(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Outbound HTTP seam shared by all adapters.
///
/// The production implementation is the resilience pipeline wrapped around a
/// pooled HTTP client; each pipeline stage and every test double implement
/// the same trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
	async fn get(&self, request: &UpstreamRequest) -> AdapterResult<UpstreamResponse>;
}

/// Synthetic success payload substituted when the pipeline gives up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackPayload {
	pub message: String,
	pub timestamp: DateTime<Utc>,
	pub source: String,
}

impl FallbackPayload {
	/// Standard unavailability payload stamped with the current time.
	pub fn unavailable() -> Self {
		Self {
			message: FALLBACK_MESSAGE.to_string(),
			timestamp: Utc::now(),
			source: FALLBACK_SOURCE.to_string(),
		}
	}

	/// Render as the degraded-success response handed to adapters.
	pub fn into_response(self) -> UpstreamResponse {
		UpstreamResponse::ok(serde_json::to_string(&self).unwrap_or_default())
	}
}

/// Extract the message of a fallback sentinel body, if `body` is one.
///
/// Real vendor payloads never carry the top-level sentinel source field, so
/// a `Some` return means the resilience pipeline substituted this response.
pub fn fallback_message(body: &str) -> Option<String> {
	let value: serde_json::Value = serde_json::from_str(body).ok()?;
	if value.get("source")?.as_str()? != FALLBACK_SOURCE {
		return None;
	}
	value.get("message")?.as_str().map(str::to_owned)
}
