//! Aggregator Service
//!
//! Fan-out orchestration over the fixed adapter set and the shared HTTP
//! resilience pipeline applied to every outbound call.

pub mod aggregator;
pub mod resilience;

pub use aggregator::AggregatorService;
pub use resilience::{
	FallbackStage, HttpTransport, ResiliencePipeline, RetryStage, TimeoutStage,
};
