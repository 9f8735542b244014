//! Capability contract implemented by each fixed endpoint adapter

use crate::options::{FilterOptions, SortingOptions};
use crate::results::EndpointResult;
use crate::transport::Transport;
use async_trait::async_trait;
use std::sync::Arc;

/// One external API behind the uniform result shape.
///
/// The adapter set is fixed at build time; implementations translate their
/// vendor's request and response shapes and apply the filter/sort fields
/// they understand. `call_endpoint` never fails: every error is folded into
/// the returned [`EndpointResult`].
#[async_trait]
pub trait EndpointAdapter: Send + Sync {
	/// Stable endpoint identity used for statistics and cache keys.
	fn endpoint_name(&self) -> &str;

	/// Invoke the upstream API through the shared transport.
	async fn call_endpoint(
		&self,
		transport: Arc<dyn Transport>,
		filter: &FilterOptions,
		sorting: &SortingOptions,
	) -> EndpointResult;
}
