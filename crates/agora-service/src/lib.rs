//! # agora-service
//!
//! Application layer: the reaction query (read path), the reaction write
//! path that keeps the ledger and count projection in step, and the DTOs
//! exchanged with the HTTP boundary.

pub mod dto;
pub mod services;

pub use dto::{
    HealthChecks, HealthResponse, ReactionCountResponse, ReactionPath, ReactionsQuery,
    ReactionsViewResponse, ReadinessResponse,
};
pub use services::{
    AccessService, QueryStage, ReactionAggregator, ReactionQueryService, ReactionService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
