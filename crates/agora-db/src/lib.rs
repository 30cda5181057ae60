//! # agora-db
//!
//! Storage adapters for the ports defined in `agora-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - PostgreSQL repository implementations
//! - An in-memory backend (`memory`) implementing the same traits, used by
//!   tests and `STORAGE_BACKEND=memory`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agora_common::AppConfig;
//! use agora_db::{create_pool, run_migrations, PgReactionLedger};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config.database.as_ref().unwrap()).await?;
//!     run_migrations(&pool).await?;
//!     let ledger = PgReactionLedger::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemoryBackend, MemoryPostRepository, MemoryReactionLedger, MemoryReactionProjection,
};
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{PgPostRepository, PgReactionLedger, PgReactionProjection};
