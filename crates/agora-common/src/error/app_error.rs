//! Application error types
//!
//! Errors that arise outside the domain (tokens, configuration, startup)
//! plus a transparent wrapper for domain errors, each with its HTTP mapping.

use agora_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Message is shown to the caller verbatim
    #[error("{0}")]
    Validation(String),

    /// Storage could not be reached or prepared at startup
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::Storage(_) => 503,
            Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status_code(e),
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

/// HTTP status for a domain error; shared by every layer that wraps one
#[must_use]
pub fn domain_status_code(err: &DomainError) -> u16 {
    match err {
        DomainError::ValidationError(_) => 400,
        DomainError::Unauthorized { .. } => 403,
        DomainError::StorageUnavailable(_) => 503,
        DomainError::StorageTimeout { .. } => 504,
        DomainError::InternalError(_) => 500,
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{EntityId, ParentRef, Role};

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Storage("refused".to_string()).status_code(), 503);
        assert_eq!(AppError::Config("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        let unauthorized = AppError::from(DomainError::Unauthorized {
            parent: ParentRef::post(EntityId::new(1)),
            role: Role::Member,
        });
        assert_eq!(unauthorized.status_code(), 403);
        assert_eq!(unauthorized.error_code(), "UNAUTHORIZED");

        let timeout = AppError::from(DomainError::StorageTimeout { operation: "upsert" });
        assert_eq!(timeout.status_code(), 504);

        let down = AppError::from(DomainError::StorageUnavailable("refused".to_string()));
        assert_eq!(down.status_code(), 503);
        assert_eq!(down.error_code(), "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::Validation("per page must be less than or equal to 20".to_string());
        assert_eq!(err.to_string(), "per page must be less than or equal to 20");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_internal_hides_source_message() {
        let err = AppError::Internal(anyhow::anyhow!("key material rejected"));
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.status_code(), 500);
    }
}
