//! Aggregator Types
//!
//! Shared models and trait seams for the API aggregator: the uniform
//! per-endpoint result shape, filter/sort options, usage statistics, the
//! outbound transport contract and the adapter capability trait.

pub mod errors;
pub mod options;
pub mod results;
pub mod secret_string;
pub mod stats;
pub mod traits;
pub mod transport;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use errors::{AdapterError, AdapterResult};
pub use options::{FilterOptions, SortBy, SortOrder, SortingOptions};
pub use results::EndpointResult;
pub use secret_string::SecretString;
pub use stats::{EndpointStats, EndpointUsage, StatisticsAccumulator, StatisticsRecorder};
pub use traits::EndpointAdapter;
pub use transport::{
	fallback_message, FallbackPayload, Transport, UpstreamRequest, UpstreamResponse,
	FALLBACK_MESSAGE, FALLBACK_SOURCE,
};
