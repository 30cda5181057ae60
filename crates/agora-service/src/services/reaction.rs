//! Reaction service (write path)
//!
//! The ledger is written first. The affected projection row is then
//! recomputed from the ledger under the parent's count lock, on every call
//! and not only when the ledger changed. A projection write that failed or
//! timed out is therefore repaired by the next write to the same row,
//! including a plain retry of the failed request. `rebuild_counts` repairs a
//! whole parent.

use agora_core::{EntityId, ParentRef, Reaction, ReactionType, RequesterContext};
use tracing::{info, instrument};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::timeout::bounded;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the requester's reaction; returns `false` when it already existed
    #[instrument(skip(self, requester), fields(user_id = ?requester.user_id))]
    pub async fn add_reaction(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
        reaction_type: &str,
    ) -> ServiceResult<bool> {
        AccessService::new(self.ctx)
            .require_mutate(requester, parent)
            .await?;
        let reaction_type = ReactionType::parse(reaction_type)?;
        let reactor_id = reactor(requester)?;

        let reaction = Reaction::new(parent, reactor_id, reaction_type);
        let inserted = bounded(
            self.ctx.storage_timeout(),
            "ledger_upsert",
            self.ctx.reaction_ledger().upsert(&reaction),
        )
        .await?;

        let count = self.sync_count(parent, &reaction.reaction_type).await?;
        if inserted {
            info!(
                parent = %parent,
                reactor_id = %reactor_id,
                reaction_type = %reaction.reaction_type,
                count,
                "Reaction added"
            );
        }

        Ok(inserted)
    }

    /// Remove the requester's reaction; returns `false` when there was none
    #[instrument(skip(self, requester), fields(user_id = ?requester.user_id))]
    pub async fn remove_reaction(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
        reaction_type: &str,
    ) -> ServiceResult<bool> {
        AccessService::new(self.ctx)
            .require_mutate(requester, parent)
            .await?;
        let reaction_type = ReactionType::parse(reaction_type)?;
        let reactor_id = reactor(requester)?;

        let removed = bounded(
            self.ctx.storage_timeout(),
            "ledger_remove",
            self.ctx
                .reaction_ledger()
                .remove(parent, reactor_id, &reaction_type),
        )
        .await?;

        let count = self.sync_count(parent, &reaction_type).await?;
        if removed {
            info!(
                parent = %parent,
                reactor_id = %reactor_id,
                reaction_type = %reaction_type,
                count,
                "Reaction removed"
            );
        }

        Ok(removed)
    }

    /// Clear every reaction on a parent (moderation or parent deletion)
    #[instrument(skip(self, requester), fields(user_id = ?requester.user_id))]
    pub async fn remove_all_reactions(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
    ) -> ServiceResult<u64> {
        AccessService::new(self.ctx)
            .require_moderate(requester, parent)
            .await?;

        let timeout = self.ctx.storage_timeout();
        let _guard = self.ctx.count_locks().lock(parent).await;

        let removed = bounded(
            timeout,
            "ledger_remove_all",
            self.ctx.reaction_ledger().remove_all(parent),
        )
        .await?;
        bounded(
            timeout,
            "projection_clear",
            self.ctx.reaction_projection().clear(parent),
        )
        .await?;

        info!(parent = %parent, removed, "All reactions removed");
        Ok(removed)
    }

    /// Recompute the count projection of a parent from the ledger
    #[instrument(skip(self))]
    pub async fn rebuild_counts(&self, parent: ParentRef) -> ServiceResult<usize> {
        let timeout = self.ctx.storage_timeout();
        let _guard = self.ctx.count_locks().lock(parent).await;

        let counts = bounded(
            timeout,
            "ledger_count_by_type",
            self.ctx.reaction_ledger().count_by_type(parent),
        )
        .await?;
        bounded(
            timeout,
            "projection_replace",
            self.ctx.reaction_projection().replace(parent, &counts),
        )
        .await?;

        info!(parent = %parent, types = counts.len(), "Reaction counts rebuilt");
        Ok(counts.len())
    }

    /// Copy the live ledger count of one type into the projection
    async fn sync_count(
        &self,
        parent: ParentRef,
        reaction_type: &ReactionType,
    ) -> ServiceResult<i64> {
        let timeout = self.ctx.storage_timeout();
        let _guard = self.ctx.count_locks().lock(parent).await;

        let count = bounded(
            timeout,
            "ledger_count_of",
            self.ctx.reaction_ledger().count_of(parent, reaction_type),
        )
        .await?;
        bounded(
            timeout,
            "projection_set_count",
            self.ctx
                .reaction_projection()
                .set_count(parent, reaction_type, count),
        )
        .await?;

        Ok(count)
    }
}

/// Identity of an authorized requester
fn reactor(requester: &RequesterContext) -> ServiceResult<EntityId> {
    requester
        .user_id
        .ok_or_else(|| ServiceError::validation("an authenticated requester is required"))
}
