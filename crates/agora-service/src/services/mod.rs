//! Business logic services
//!
//! Each service borrows the `ServiceContext` for the duration of one call.

pub mod access;
pub mod aggregation;
pub mod context;
mod count_locks;
pub mod error;
pub mod query;
pub mod reaction;
mod timeout;

#[cfg(test)]
mod test_support;

pub use access::AccessService;
pub use aggregation::ReactionAggregator;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use query::{QueryStage, ReactionQueryService};
pub use reaction::ReactionService;
