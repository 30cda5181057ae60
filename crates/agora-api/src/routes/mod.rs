//! Route definitions
//!
//! Reaction routes are mounted under /api/v1; probes and API docs sit at the root.

use axum::{
    routing::{delete, get, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health, reactions};
use crate::openapi::{ApiDoc, OPENAPI_JSON_PATH};
use crate::state::AppState;

/// Create the API router (probes excluded, see `health_routes`)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}

/// Health check routes (mounted outside the rate limiter)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(reaction_routes())
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/reactions", get(reactions::get_reactions))
        .route(
            "/reactions/:parent_type/:parent_id",
            delete(reactions::remove_all_reactions),
        )
        .route(
            "/reactions/:parent_type/:parent_id/:reaction_type",
            put(reactions::add_reaction).delete(reactions::remove_reaction),
        )
}
