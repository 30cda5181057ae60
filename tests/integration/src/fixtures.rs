//! Test fixtures and response shapes

use serde::Deserialize;
use std::sync::atomic::{AtomicI64, Ordering};

use agora_core::{EntityId, Role};

/// Counter for unique ids
static COUNTER: AtomicI64 = AtomicI64::new(1_000);

/// Get a unique id for test data
pub fn unique_id() -> EntityId {
    EntityId::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// A signed-in test user
#[derive(Debug, Clone, Copy)]
pub struct TestUser {
    pub id: EntityId,
    pub role: Role,
}

impl TestUser {
    pub fn new(role: Role) -> Self {
        Self {
            id: unique_id(),
            role,
        }
    }
}

/// `GET /api/v1/reactions` body
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ReactionsView {
    pub counts: Vec<CountRow>,
    pub reactions: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct CountRow {
    #[serde(rename = "type")]
    pub reaction_type: String,
    pub count: i64,
}

impl ReactionsView {
    /// `(type, count)` pairs in response order
    pub fn pairs(&self) -> Vec<(&str, i64)> {
        self.counts
            .iter()
            .map(|row| (row.reaction_type.as_str(), row.count))
            .collect()
    }
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
