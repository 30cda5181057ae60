//! Reaction ledger record, count projection row and the aggregated view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ParentRef;
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Reaction kind from the fixed vocabulary
///
/// Ordering is lexicographic on the identifier, which is the stable order
/// counts are paginated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReactionType(String);

impl ReactionType {
    /// Every legal reaction identifier, sorted
    pub const VOCABULARY: [&'static str; 6] =
        ["celebrate", "curious", "insightful", "like", "love", "support"];

    /// Validate an identifier against the vocabulary
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if Self::VOCABULARY.contains(&s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::ValidationError(format!(
                "unknown reaction type: {s}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ReactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ReactionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ReactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One ledger row: `reactor_id` reacted to `parent` with `reaction_type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub parent: ParentRef,
    pub reactor_id: EntityId,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(parent: ParentRef, reactor_id: EntityId, reaction_type: ReactionType) -> Self {
        Self {
            parent,
            reactor_id,
            reaction_type,
            created_at: Utc::now(),
        }
    }

    /// Identity tuple; the ledger holds at most one row per key
    pub fn key(&self) -> (ParentRef, EntityId, ReactionType) {
        (self.parent, self.reactor_id, self.reaction_type.clone())
    }
}

/// Projection row: number of reactions of one type on one parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCount {
    pub reaction_type: ReactionType,
    pub count: i64,
}

impl ReactionCount {
    /// Create a new ReactionCount
    pub fn new(reaction_type: ReactionType, count: i64) -> Self {
        Self {
            reaction_type,
            count,
        }
    }
}

/// Engagement view of one parent for one requester
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactionsView {
    /// Requested page of per-type counts, ordered by type
    pub counts: Vec<ReactionCount>,
    /// Every type the requester applied, sorted, never paginated
    pub reactions: Vec<ReactionType>,
}
