//! # agora-core
//!
//! Domain layer for post engagement: identifiers, requester roles, reactable
//! parents, the reaction ledger model, the pagination contract, the access
//! policy and the repository traits the storage layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Parent, ParentRef, ParentType, Post, PostKind, Reaction, ReactionCount, ReactionType,
    ReactionsView,
};
pub use error::DomainError;
pub use pagination::PageRequest;
pub use policy::AccessPolicy;
pub use traits::{PostRepository, ReactionLedger, ReactionProjection, RepoResult};
pub use value_objects::{Capabilities, EntityId, IdParseError, RequesterContext, Role};
