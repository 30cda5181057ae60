//! In-memory storage backend
//!
//! `DashMap`-backed implementations of every storage port. Writes for one
//! parent take that parent's shard lock, which serializes same-tuple writes
//! the way the ledger primary key does in PostgreSQL. Nothing survives a
//! restart.

mod ledger;
mod post;
mod projection;

use std::sync::Arc;

pub use ledger::MemoryReactionLedger;
pub use post::MemoryPostRepository;
pub use projection::MemoryReactionProjection;

/// The three in-memory stores, shared behind `Arc`s
#[derive(Clone, Default)]
pub struct MemoryBackend {
    pub posts: Arc<MemoryPostRepository>,
    pub ledger: Arc<MemoryReactionLedger>,
    pub projection: Arc<MemoryReactionProjection>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}
