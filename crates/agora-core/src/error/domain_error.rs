//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ParentRef;
use crate::value_objects::Role;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authorization Errors
    // =========================================================================
    /// Requester may not see (or change) the parent. Also returned for parents
    /// that do not exist so callers cannot probe for existence.
    #[error("{role} requester is not authorized for {parent}")]
    Unauthorized { parent: ParentRef, role: Role },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// Caller-fixable input problem; the message is displayed verbatim.
    #[error("{0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage timed out during {operation}")]
    StorageTimeout { operation: &'static str },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::StorageTimeout { .. } => "STORAGE_TIMEOUT",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if the storage collaborator failed
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageTimeout { .. } | Self::StorageUnavailable(_)
        )
    }
}
