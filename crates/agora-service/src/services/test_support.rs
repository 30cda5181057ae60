//! Shared fixtures for service tests

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use agora_core::{
    EntityId, ParentRef, Post, PostKind, ReactionCount, ReactionProjection, ReactionType,
    RepoResult, RequesterContext, Role,
};
use agora_db::{MemoryBackend, MemoryReactionProjection};

use super::context::ServiceContext;

/// Author of every fixture post
pub const AUTHOR: EntityId = EntityId::new(1);

/// In-memory backend plus a context wired to it
pub struct Fixture {
    pub backend: MemoryBackend,
    pub ctx: ServiceContext,
    next_id: AtomicI64,
}

impl Fixture {
    pub fn new() -> Self {
        let backend = MemoryBackend::new();
        let ctx = ServiceContext::builder()
            .post_repo(backend.posts.clone())
            .reaction_ledger(backend.ledger.clone())
            .reaction_projection(backend.projection.clone())
            .storage_timeout(Duration::from_millis(500))
            .build()
            .unwrap();

        Self {
            backend,
            ctx,
            next_id: AtomicI64::new(1000),
        }
    }

    /// Store a post by `AUTHOR` and return its reference
    pub fn post(&self, kind: PostKind) -> ParentRef {
        let id = EntityId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.backend.posts.insert(Post::new(id, AUTHOR, kind));
        ParentRef::post(id)
    }
}

pub fn user(id: i64, role: Role) -> RequesterContext {
    RequesterContext::authenticated(EntityId::new(id), role)
}

pub fn rt(s: &str) -> ReactionType {
    ReactionType::parse(s).unwrap()
}

pub fn counts(rows: &[(&str, i64)]) -> Vec<ReactionCount> {
    rows.iter()
        .map(|(kind, count)| ReactionCount::new(rt(kind), *count))
        .collect()
}

pub fn types(names: &[&str]) -> Vec<ReactionType> {
    names.iter().map(|name| rt(name)).collect()
}

/// Projection that never answers in time
pub struct StalledProjection;

#[async_trait]
impl ReactionProjection for StalledProjection {
    async fn counts_by_parent(&self, _parent: ParentRef) -> RepoResult<Vec<ReactionCount>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn set_count(
        &self,
        _parent: ParentRef,
        _reaction_type: &ReactionType,
        _count: i64,
    ) -> RepoResult<()> {
        Ok(())
    }

    async fn replace(&self, _parent: ParentRef, _counts: &[ReactionCount]) -> RepoResult<()> {
        Ok(())
    }

    async fn clear(&self, _parent: ParentRef) -> RepoResult<()> {
        Ok(())
    }
}

/// Memory projection whose row writes never finish
pub struct StalledCountWrites {
    inner: Arc<MemoryReactionProjection>,
}

impl StalledCountWrites {
    pub fn new(inner: Arc<MemoryReactionProjection>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ReactionProjection for StalledCountWrites {
    async fn counts_by_parent(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>> {
        self.inner.counts_by_parent(parent).await
    }

    async fn set_count(
        &self,
        _parent: ParentRef,
        _reaction_type: &ReactionType,
        _count: i64,
    ) -> RepoResult<()> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }

    async fn replace(&self, parent: ParentRef, counts: &[ReactionCount]) -> RepoResult<()> {
        self.inner.replace(parent, counts).await
    }

    async fn clear(&self, parent: ParentRef) -> RepoResult<()> {
        self.inner.clear(parent).await
    }
}

/// Set of reaction types, for comparing "my reactions"
pub fn type_set(names: &[&str]) -> BTreeSet<ReactionType> {
    names.iter().map(|name| rt(name)).collect()
}
