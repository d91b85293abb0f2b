//! Common types shared by all aggregates

pub mod aggregate_id;
pub mod api_endpoints;
pub mod model_type;

// Re-exports
pub use aggregate_id::AggregateId;
pub use api_endpoints::ApiEndpoint;
pub use model_type::ModelType;
