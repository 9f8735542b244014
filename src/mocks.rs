//! Scripted transports for tests and downstream consumers
//!
//! [`MockTransport`] answers requests with canned replies routed by URL
//! substring and counts every invocation, so callers can verify exactly how
//! many upstream calls a scenario produced (for example: a second aggregate
//! inside the TTL window must add none).

use agg_types::{AdapterError, AdapterResult, Transport, UpstreamRequest, UpstreamResponse};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One canned reply: a response with status and body, or a transport error.
#[derive(Debug, Clone)]
pub enum MockReply {
	Response { status: u16, body: String },
	Error(String),
}

impl MockReply {
	pub fn ok(body: &str) -> Self {
		Self::status(200, body)
	}

	pub fn status(status: u16, body: &str) -> Self {
		Self::Response {
			status,
			body: body.to_string(),
		}
	}

	pub fn error(message: &str) -> Self {
		Self::Error(message.to_string())
	}

	fn produce(&self) -> AdapterResult<UpstreamResponse> {
		match self {
			Self::Response { status, body } => {
				Ok(UpstreamResponse::with_status(*status, body.clone()))
			},
			Self::Error(message) => Err(AdapterError::Network(message.clone())),
		}
	}
}

/// Transport double routing requests to canned replies by URL substring;
/// unmatched requests receive the default reply.
pub struct MockTransport {
	routes: Vec<(String, MockReply)>,
	default_reply: MockReply,
	calls: AtomicUsize,
}

impl MockTransport {
	/// Same reply for every request.
	pub fn always(reply: MockReply) -> Self {
		Self::with_routes(Vec::new(), reply)
	}

	/// Route by URL substring, with a default for unmatched requests.
	pub fn with_routes(routes: Vec<(&str, MockReply)>, default_reply: MockReply) -> Self {
		Self {
			routes: routes
				.into_iter()
				.map(|(pattern, reply)| (pattern.to_string(), reply))
				.collect(),
			default_reply,
			calls: AtomicUsize::new(0),
		}
	}

	/// Total number of requests this transport has served.
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn get(&self, request: &UpstreamRequest) -> AdapterResult<UpstreamResponse> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		for (pattern, reply) in &self.routes {
			if request.url.contains(pattern.as_str()) {
				return reply.produce();
			}
		}
		self.default_reply.produce()
	}
}

/// Canned vendor payloads shared across tests.
pub mod bodies {
	pub const WEATHER: &str =
		r#"{"weather":[{"description":"clear sky"}],"main":{"temp":25.3}}"#;

	pub const NEWS: &str = r#"{
		"status": "ok",
		"totalResults": 2,
		"articles": [
			{"title": "Markets rally", "description": "Up and to the right", "publishedAt": "2025-05-02T08:00:00Z"},
			{"title": "Airline merger approved", "description": "Deal closes", "publishedAt": "2025-05-01T12:00:00Z"}
		]
	}"#;

	pub const SPORTS: &str = r#"{
		"matches": [{
			"utcDate": "2025-05-01T20:00:00Z",
			"homeTeam": {"name": "TeamA"},
			"awayTeam": {"name": "TeamB"},
			"score": {"fullTime": {"home": 2, "away": 1}}
		}]
	}"#;

	pub const FALLBACK: &str =
		r#"{"source":"PollyFallback","message":"Fallback triggered"}"#;
}
