//! Error handling utilities for repositories

use agora_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Connectivity problems become `StorageUnavailable` (or `StorageTimeout` when
/// the pool could not hand out a connection in time); anything the server
/// itself rejected is an internal error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut => DomainError::StorageTimeout {
            operation: "connection acquire",
        },
        SqlxError::Database(db_err) => DomainError::InternalError(db_err.to_string()),
        other => DomainError::StorageUnavailable(other.to_string()),
    }
}
