//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use agora_core::{ReactionCount, ReactionsView};

// ============================================================================
// Reaction Responses
// ============================================================================

/// Number of reactions of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReactionCountResponse {
    #[serde(rename = "type")]
    #[schema(example = "like")]
    pub reaction_type: String,
    pub count: i64,
}

impl From<&ReactionCount> for ReactionCountResponse {
    fn from(row: &ReactionCount) -> Self {
        Self {
            reaction_type: row.reaction_type.to_string(),
            count: row.count,
        }
    }
}

/// Engagement of one parent as seen by the requester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReactionsViewResponse {
    /// Requested page of per-type counts, ordered by type
    pub counts: Vec<ReactionCountResponse>,
    /// Types the requester applied to the parent
    pub reactions: Vec<String>,
}

impl From<ReactionsView> for ReactionsViewResponse {
    fn from(view: ReactionsView) -> Self {
        Self {
            counts: view.counts.iter().map(ReactionCountResponse::from).collect(),
            reactions: view.reactions.iter().map(ToString::to_string).collect(),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status per dependency
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
