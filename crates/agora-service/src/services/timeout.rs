//! Deadline for individual storage calls

use std::future::Future;
use std::time::Duration;

use agora_core::{DomainError, RepoResult};
use tracing::warn;

/// Run one storage call, failing with `StorageTimeout` once `limit` elapses
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Storage call timed out");
            Err(DomainError::StorageTimeout { operation })
        }
    }
}
