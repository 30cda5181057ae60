//! Reactable parents
//!
//! `ParentType` is the discriminator stored next to every reaction row and
//! `Parent` is the loaded content behind it. Supporting a new reactable kind
//! means adding a variant to both plus an arm in the access policy; the
//! aggregation code only ever sees a `ParentRef`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Post;
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Which entity collection a parent id resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParentType {
    Post,
}

impl ParentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "Post",
        }
    }
}

impl fmt::Display for ParentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Post" => Ok(Self::Post),
            _ => Err(DomainError::ValidationError(format!("unknown parent type: {s}"))),
        }
    }
}

/// Typed reference to a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParentRef {
    pub id: EntityId,
    pub parent_type: ParentType,
}

impl ParentRef {
    pub fn new(id: EntityId, parent_type: ParentType) -> Self {
        Self { id, parent_type }
    }

    /// Reference to a post
    pub fn post(id: EntityId) -> Self {
        Self::new(id, ParentType::Post)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.parent_type, self.id)
    }
}

/// Loaded parent content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Post(Post),
}

impl Parent {
    pub fn reference(&self) -> ParentRef {
        match self {
            Self::Post(post) => ParentRef::post(post.id),
        }
    }

    pub fn author_id(&self) -> EntityId {
        match self {
            Self::Post(post) => post.author_id,
        }
    }
}

impl From<Post> for Parent {
    fn from(post: Post) -> Self {
        Self::Post(post)
    }
}
