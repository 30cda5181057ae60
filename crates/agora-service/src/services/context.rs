//! Service context - dependency container for services
//!
//! Holds the storage ports and tuning knobs the services need. Every
//! collaborator is passed in explicitly; nothing is looked up globally.

use std::sync::Arc;
use std::time::Duration;

use agora_common::ReactionsConfig;
use agora_core::{PostRepository, ReactionLedger, ReactionProjection};
use agora_db::PgPool;

use super::count_locks::CountLocks;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent on the in-memory backend
    pool: Option<PgPool>,

    // Storage ports
    post_repo: Arc<dyn PostRepository>,
    reaction_ledger: Arc<dyn ReactionLedger>,
    reaction_projection: Arc<dyn ReactionProjection>,

    // Serializes projection writes per parent
    count_locks: Arc<CountLocks>,

    // Tuning
    storage_timeout: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        post_repo: Arc<dyn PostRepository>,
        reaction_ledger: Arc<dyn ReactionLedger>,
        reaction_projection: Arc<dyn ReactionProjection>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            pool,
            post_repo,
            reaction_ledger,
            reaction_projection,
            count_locks: Arc::new(CountLocks::new()),
            storage_timeout,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if this context runs on PostgreSQL
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the content store
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the reaction ledger
    pub fn reaction_ledger(&self) -> &dyn ReactionLedger {
        self.reaction_ledger.as_ref()
    }

    /// Get the reaction count projection
    pub fn reaction_projection(&self) -> &dyn ReactionProjection {
        self.reaction_projection.as_ref()
    }

    pub(crate) fn count_locks(&self) -> &CountLocks {
        &self.count_locks
    }

    // === Tuning ===

    /// Upper bound for a single storage call
    pub fn storage_timeout(&self) -> Duration {
        self.storage_timeout
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("storage_timeout", &self.storage_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_ledger: Option<Arc<dyn ReactionLedger>>,
    reaction_projection: Option<Arc<dyn ReactionProjection>>,
    storage_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            post_repo: None,
            reaction_ledger: None,
            reaction_projection: None,
            storage_timeout: ReactionsConfig::default().storage_timeout(),
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_ledger(mut self, ledger: Arc<dyn ReactionLedger>) -> Self {
        self.reaction_ledger = Some(ledger);
        self
    }

    pub fn reaction_projection(mut self, projection: Arc<dyn ReactionProjection>) -> Self {
        self.reaction_projection = Some(projection);
        self
    }

    pub fn storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool,
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.reaction_ledger
                .ok_or_else(|| ServiceError::validation("reaction_ledger is required"))?,
            self.reaction_projection
                .ok_or_else(|| ServiceError::validation("reaction_projection is required"))?,
            self.storage_timeout,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
