//! PostgreSQL implementation of ReactionProjection

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use agora_core::{ParentRef, ReactionCount, ReactionProjection, ReactionType, RepoResult};

use crate::models::ReactionCountModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionProjection
#[derive(Clone)]
pub struct PgReactionProjection {
    pool: PgPool,
}

impl PgReactionProjection {
    /// Create a new PgReactionProjection
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionProjection for PgReactionProjection {
    #[instrument(skip(self))]
    async fn counts_by_parent(&self, parent: ParentRef) -> RepoResult<Vec<ReactionCount>> {
        let rows = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT reaction_type, count
            FROM reaction_counts
            WHERE parent_type = $1 AND parent_id = $2 AND count > 0
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
    async fn set_count(
        &self,
        parent: ParentRef,
        reaction_type: &ReactionType,
        count: i64,
    ) -> RepoResult<()> {
        let query = if count > 0 {
            sqlx::query(
                r#"
                INSERT INTO reaction_counts (parent_type, parent_id, reaction_type, count)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (parent_type, parent_id, reaction_type)
                DO UPDATE SET count = EXCLUDED.count
                "#,
            )
            .bind(parent.parent_type.as_str())
            .bind(parent.id.into_inner())
            .bind(reaction_type.as_str())
            .bind(count)
        } else {
            sqlx::query(
                r#"
                DELETE FROM reaction_counts
                WHERE parent_type = $1 AND parent_id = $2 AND reaction_type = $3
                "#,
            )
            .bind(parent.parent_type.as_str())
            .bind(parent.id.into_inner())
            .bind(reaction_type.as_str())
        };

        query.execute(&self.pool).await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, counts), fields(types = counts.len()))]
    async fn replace(&self, parent: ParentRef, counts: &[ReactionCount]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM reaction_counts WHERE parent_type = $1 AND parent_id = $2
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for row in counts.iter().filter(|row| row.count > 0) {
            sqlx::query(
                r#"
                INSERT INTO reaction_counts (parent_type, parent_id, reaction_type, count)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(parent.parent_type.as_str())
            .bind(parent.id.into_inner())
            .bind(row.reaction_type.as_str())
            .bind(row.count)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self, parent: ParentRef) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM reaction_counts WHERE parent_type = $1 AND parent_id = $2
            "#,
        )
        .bind(parent.parent_type.as_str())
        .bind(parent.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
