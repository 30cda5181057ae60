//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation. Implementations map their own failures onto
//! `DomainError::StorageUnavailable`.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::entities::{ParentRef, Post, Reaction, ReactionCount, ReactionType};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Content Store
// ============================================================================

/// Read-only access to posts owned by the content store
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Post>>;
}

// ============================================================================
// Reaction Ledger
// ============================================================================

/// Source of truth for individual reactions
///
/// Writes for the same (parent, reactor, type) tuple must be serialized by
/// the implementation; distinct tuples may proceed concurrently.
#[async_trait]
pub trait ReactionLedger: Send + Sync {
    /// Insert a reaction unless the identical tuple exists.
    /// Returns `true` when a row was inserted.
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<bool>;

    /// Delete a reaction if present. Returns `true` when a row was removed.
    async fn remove(
        &self,
        parent: ParentRef,
        reactor_id: EntityId,
        reaction_type: &ReactionType,
    ) -> RepoResult<bool>;

    /// Every type the reactor applied to the parent
    async fn reactions_by_user(
        &self,
        parent: ParentRef,
        reactor_id: EntityId,
    ) -> RepoResult<BTreeSet<ReactionType>>;

    /// Live number of reactions of one type on the parent
    async fn count_of(&self, parent: ParentRef, reaction_type: &ReactionType) -> RepoResult<i64>;

    /// Live per-type counts computed from ledger rows, type ascending
    async fn count_by_type(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>>;

    /// Delete every reaction on the parent, returning the number removed
    async fn remove_all(&self, parent: ParentRef) -> RepoResult<u64>;
}

// ============================================================================
// Reaction Count Projection
// ============================================================================

/// Per-(parent, type) counts maintained from the ledger
///
/// Writers recompute a row from the ledger instead of adjusting it, so a
/// lost write is corrected by the next one.
#[async_trait]
pub trait ReactionProjection: Send + Sync {
    /// Non-zero counts for the parent, type ascending
    async fn counts_by_parent(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>>;

    /// Overwrite the count for one type; zero drops the row
    async fn set_count(
        &self,
        parent: ParentRef,
        reaction_type: &ReactionType,
        count: i64,
    ) -> RepoResult<()>;

    /// Replace every count of the parent with the given rows
    async fn replace(&self, parent: ParentRef, counts: &[ReactionCount]) -> RepoResult<()>;

    /// Drop every count of the parent
    async fn clear(&self, parent: ParentRef) -> RepoResult<()>;
}
