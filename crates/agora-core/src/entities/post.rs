//! Post entity - the content item reactions currently attach to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Visibility class of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    /// Visible to every signed-in member
    Community,
    /// Visible to mentors only
    MentorNews,
}

impl PostKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Community => "community",
            Self::MentorNews => "mentor_news",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "community" => Ok(Self::Community),
            "mentor_news" => Ok(Self::MentorNews),
            _ => Err(DomainError::ValidationError(format!("unknown post kind: {s}"))),
        }
    }
}

/// Post entity (read-only view owned by the content store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub author_id: EntityId,
    pub kind: PostKind,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post
    pub fn new(id: EntityId, author_id: EntityId, kind: PostKind) -> Self {
        Self {
            id,
            author_id,
            kind,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: EntityId) -> bool {
        self.author_id == user_id
    }
}
