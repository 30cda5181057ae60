//! Reaction entity <-> model mappers

use chrono::{DateTime, Utc};

use agora_core::{DomainError, Reaction, ReactionCount, ReactionType};

use crate::models::ReactionCountModel;

/// Validate a reaction type read back from storage
pub fn reaction_type_from_db(raw: &str) -> Result<ReactionType, DomainError> {
    ReactionType::parse(raw).map_err(|_| {
        DomainError::InternalError(format!(
            "stored reaction type {raw:?} is not in the vocabulary"
        ))
    })
}

impl TryFrom<ReactionCountModel> for ReactionCount {
    type Error = DomainError;

    fn try_from(model: ReactionCountModel) -> Result<Self, Self::Error> {
        Ok(ReactionCount::new(
            reaction_type_from_db(&model.reaction_type)?,
            model.count,
        ))
    }
}

/// Column values of a ledger row
pub struct ReactionInsert<'a> {
    pub parent_type: &'static str,
    pub parent_id: i64,
    pub reactor_id: i64,
    pub reaction_type: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(reaction: &'a Reaction) -> Self {
        Self {
            parent_type: reaction.parent.parent_type.as_str(),
            parent_id: reaction.parent.id.into_inner(),
            reactor_id: reaction.reactor_id.into_inner(),
            reaction_type: reaction.reaction_type.as_str(),
            created_at: reaction.created_at,
        }
    }
}
