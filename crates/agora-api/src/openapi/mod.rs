//! OpenAPI document served next to the API

use agora_service::{
    HealthChecks, HealthResponse, ReactionCountResponse, ReactionsViewResponse, ReadinessResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{health, reactions};
use crate::response::{ErrorBody, ErrorDetail};

/// Path of the generated JSON document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Agora reactions API"),
    paths(
        reactions::get_reactions,
        reactions::add_reaction,
        reactions::remove_reaction,
        reactions::remove_all_reactions,
        health::health_check,
        health::readiness_check,
    ),
    components(schemas(
        ReactionsViewResponse,
        ReactionCountResponse,
        HealthResponse,
        ReadinessResponse,
        HealthChecks,
        ErrorBody,
        ErrorDetail,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "reactions", description = "Reaction summaries and reaction writes"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
