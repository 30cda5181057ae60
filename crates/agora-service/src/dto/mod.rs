//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with structural validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

pub use requests::{ReactionPath, ReactionsQuery};
pub use responses::{
    HealthChecks, HealthResponse, ReactionCountResponse, ReactionsViewResponse, ReadinessResponse,
};
