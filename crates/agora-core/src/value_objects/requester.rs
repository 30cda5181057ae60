//! Requester identity as supplied by the identity/session provider

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Capabilities, EntityId};
use crate::error::DomainError;

/// Platform role of a requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Anonymous, not signed in
    #[default]
    Visitor,
    Member,
    Mentor,
    Admin,
}

impl Role {
    /// Capabilities granted by this role
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Visitor => Capabilities::empty(),
            Self::Member => Capabilities::MEMBER,
            Self::Mentor => Capabilities::MENTOR,
            Self::Admin => Capabilities::ALL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Member => "member",
            Self::Mentor => "mentor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visitor" => Ok(Self::Visitor),
            "member" => Ok(Self::Member),
            "mentor" => Ok(Self::Mentor),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::ValidationError(format!("unknown role: {s}"))),
        }
    }
}

/// Opaque capability bundle describing who is asking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequesterContext {
    pub user_id: Option<EntityId>,
    pub role: Role,
}

impl RequesterContext {
    /// Anonymous requester
    pub fn visitor() -> Self {
        Self {
            user_id: None,
            role: Role::Visitor,
        }
    }

    /// Signed-in requester
    pub fn authenticated(user_id: EntityId, role: Role) -> Self {
        Self {
            user_id: Some(user_id),
            role,
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Capabilities of this requester; anonymous requesters have none
    pub fn capabilities(&self) -> Capabilities {
        if self.is_authenticated() {
            self.role.capabilities()
        } else {
            Capabilities::empty()
        }
    }

    /// Check whether the requester is the given user
    #[inline]
    pub fn is(&self, user_id: EntityId) -> bool {
        self.user_id == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Visitor.capabilities().is_empty());
        assert_eq!(Role::Member.capabilities(), Capabilities::MEMBER);
        assert_eq!(Role::Mentor.capabilities(), Capabilities::MENTOR);
        assert_eq!(Role::Admin.capabilities(), Capabilities::ALL);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Mentor".parse::<Role>().unwrap(), Role::Mentor);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        let err = "owner".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: owner");
    }

    #[test]
    fn test_visitor_has_no_capabilities() {
        let visitor = RequesterContext::visitor();
        assert!(!visitor.is_authenticated());
        assert!(visitor.capabilities().is_empty());

        // A role claim without an identity grants nothing
        let forged = RequesterContext {
            user_id: None,
            role: Role::Admin,
        };
        assert!(forged.capabilities().is_empty());
    }

    #[test]
    fn test_is() {
        let requester = RequesterContext::authenticated(EntityId::new(5), Role::Member);
        assert!(requester.is(EntityId::new(5)));
        assert!(!requester.is(EntityId::new(6)));
        assert!(!RequesterContext::visitor().is(EntityId::new(5)));
    }
}
