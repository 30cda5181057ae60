//! Access service
//!
//! Resolves a parent reference against the content store and applies the
//! access policy. A parent that does not exist is indistinguishable from
//! one the requester may not see.

use agora_core::{AccessPolicy, DomainError, Parent, ParentRef, ParentType, RequesterContext};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::timeout::bounded;

/// What the requester wants to do with the parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    View,
    Mutate,
    Moderate,
}

impl Access {
    fn allows(self, requester: &RequesterContext, parent: &Parent) -> bool {
        match self {
            Self::View => AccessPolicy::can_view(requester, parent),
            Self::Mutate => AccessPolicy::can_mutate(requester, parent),
            Self::Moderate => AccessPolicy::can_moderate(requester, parent),
        }
    }
}

/// Access service for parent-level authorization
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    /// Create a new AccessService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the parent content, if it exists
    #[instrument(skip(self))]
    pub async fn resolve(&self, parent: ParentRef) -> ServiceResult<Option<Parent>> {
        let loaded = match parent.parent_type {
            ParentType::Post => bounded(
                self.ctx.storage_timeout(),
                "find_post",
                self.ctx.post_repo().find_by_id(parent.id),
            )
            .await?
            .map(Parent::from),
        };
        Ok(loaded)
    }

    /// Require read access to the parent
    pub async fn require_view(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
    ) -> ServiceResult<Parent> {
        self.require(requester, parent, Access::View).await
    }

    /// Require permission to add or remove the requester's own reactions
    pub async fn require_mutate(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
    ) -> ServiceResult<Parent> {
        self.require(requester, parent, Access::Mutate).await
    }

    /// Require permission to clear every reaction on the parent
    pub async fn require_moderate(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
    ) -> ServiceResult<Parent> {
        self.require(requester, parent, Access::Moderate).await
    }

    async fn require(
        &self,
        requester: &RequesterContext,
        parent: ParentRef,
        access: Access,
    ) -> ServiceResult<Parent> {
        // Visitors are rejected before touching storage
        if !requester.is_authenticated() {
            warn!(parent = %parent, ?access, "Anonymous requester rejected");
            return Err(unauthorized(requester, parent));
        }

        match self.resolve(parent).await? {
            Some(loaded) if access.allows(requester, &loaded) => {
                debug!(parent = %parent, ?access, "Access granted");
                Ok(loaded)
            }
            Some(_) => {
                warn!(parent = %parent, role = %requester.role, ?access, "Access denied");
                Err(unauthorized(requester, parent))
            }
            None => {
                warn!(parent = %parent, ?access, "Parent not found");
                Err(unauthorized(requester, parent))
            }
        }
    }
}

fn unauthorized(requester: &RequesterContext, parent: ParentRef) -> super::error::ServiceError {
    DomainError::Unauthorized {
        parent,
        role: requester.role,
    }
    .into()
}
