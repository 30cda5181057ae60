//! PostgreSQL implementation of ReactionLedger
//!
//! The primary key covers the whole identity tuple, so concurrent upserts of
//! the same reaction collapse to one row via `ON CONFLICT DO NOTHING`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::{
    EntityId, ParentRef, Reaction, ReactionCount, ReactionLedger, ReactionType, RepoResult,
};

use crate::mappers::{reaction_type_from_db, ReactionInsert};
use crate::models::ReactionCountModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionLedger
#[derive(Clone)]
pub struct PgReactionLedger {
    pool: PgPool,
}

impl PgReactionLedger {
    /// Create a new PgReactionLedger
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionLedger for PgReactionLedger {
    #[instrument(
        skip(self, reaction),
        fields(parent = %reaction.parent, reactor_id = %reaction.reactor_id)
    )]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<bool> {
        let insert = ReactionInsert::new(reaction);

        let result = sqlx::query(
            r#"
            INSERT INTO reactions (parent_type, parent_id, reactor_id, reaction_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (parent_type, parent_id, reactor_id, reaction_type) DO NOTHING
            "#,
        )
        .bind(insert.parent_type)
        .bind(insert.parent_id)
        .bind(insert.reactor_id)
        .bind(insert.reaction_type)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        parent: ParentRef,
        reactor_id: EntityId,
        reaction_type: &ReactionType,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE parent_type = $1 AND parent_id = $2 AND reactor_id = $3 AND reaction_type = $4
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .bind(reactor_id.into_inner())
        .bind(reaction_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn reactions_by_user(
        &self,
        parent: ParentRef,
        reactor_id: EntityId,
    ) -> RepoResult<BTreeSet<ReactionType>> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT reaction_type
            FROM reactions
            WHERE parent_type = $1 AND parent_id = $2 AND reactor_id = $3
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .bind(reactor_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.iter().map(|raw| reaction_type_from_db(raw)).collect()
    }

    #[instrument(skip(self))]
    async fn count_of(&self, parent: ParentRef, reaction_type: &ReactionType) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM reactions
            WHERE parent_type = $1 AND parent_id = $2 AND reaction_type = $3
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .bind(reaction_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_by_type(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>> {
        let rows = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE parent_type = $1 AND parent_id = $2
            GROUP BY reaction_type
            ORDER BY reaction_type
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ReactionCount::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn remove_all(&self, parent: ParentRef) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions WHERE parent_type = $1 AND parent_id = $2
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionLedger>();
    }
}
