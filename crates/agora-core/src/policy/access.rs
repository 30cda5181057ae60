//! Who may see, react to, and moderate a parent
//!
//! Rules:
//! 1. Anonymous requesters can do nothing
//! 2. Authors can always see their own content
//! 3. Community posts need VIEW_COMMUNITY, mentor news needs VIEW_MENTOR_NEWS
//! 4. Reacting needs view access plus REACT
//! 5. Clearing all reactions needs authorship or MODERATE

use crate::entities::{Parent, Post, PostKind};
use crate::value_objects::{Capabilities, RequesterContext};

/// Stateless access policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Whether the requester may read the parent and its engagement
    pub fn can_view(requester: &RequesterContext, parent: &Parent) -> bool {
        if !requester.is_authenticated() {
            return false;
        }
        if requester.is(parent.author_id()) {
            return true;
        }

        match parent {
            Parent::Post(post) => Self::can_view_post(requester.capabilities(), post),
        }
    }

    /// Whether the requester may add or remove their own reactions
    pub fn can_mutate(requester: &RequesterContext, parent: &Parent) -> bool {
        Self::can_view(requester, parent) && requester.capabilities().has(Capabilities::REACT)
    }

    /// Whether the requester may clear every reaction on the parent
    pub fn can_moderate(requester: &RequesterContext, parent: &Parent) -> bool {
        requester.is_authenticated()
            && (requester.is(parent.author_id())
                || requester.capabilities().has(Capabilities::MODERATE))
    }

    fn can_view_post(capabilities: Capabilities, post: &Post) -> bool {
        match post.kind {
            PostKind::Community => capabilities.has(Capabilities::VIEW_COMMUNITY),
            PostKind::MentorNews => capabilities.has(Capabilities::VIEW_MENTOR_NEWS),
        }
    }
}
