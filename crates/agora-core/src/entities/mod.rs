//! Domain entities - core business objects

mod parent;
mod post;
mod reaction;

pub use parent::{Parent, ParentRef, ParentType};
pub use post::{Post, PostKind};
pub use reaction::{Reaction, ReactionCount, ReactionType, ReactionsView};
