//! Reaction database models

use sqlx::FromRow;

/// Per-type count, read from the projection table or aggregated from the ledger
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub reaction_type: String,
    pub count: i64,
}
