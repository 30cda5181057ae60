//! Reaction handlers
//!
//! Endpoints for reading a parent's reaction summary and for changing the
//! requester's own reactions.

use axum::{extract::State, Json};

use agora_service::{
    ReactionPath, ReactionQueryService, ReactionService, ReactionsQuery, ReactionsViewResponse,
};

use crate::extractors::{Requester, ValidatedPath, ValidatedQuery};
use crate::response::{ApiError, ApiResult, ErrorBody, NoContent};
use crate::state::AppState;

/// Reaction counts and the requester's own reactions
///
/// GET /api/v1/reactions?parent=&parentType=&page=&perPage=
#[utoipa::path(
    get,
    path = "/api/v1/reactions",
    tag = "reactions",
    params(ReactionsQuery),
    responses(
        (status = 200, description = "Requested page of counts", body = ReactionsViewResponse),
        (status = 400, description = "Malformed parent or pagination", body = ErrorBody),
        (status = 401, description = "Invalid or expired token", body = ErrorBody),
        (status = 403, description = "Requester may not view the parent", body = ErrorBody),
        (status = 504, description = "Storage did not answer in time", body = ErrorBody)
    ),
    security((), ("bearer" = []))
)]
pub async fn get_reactions(
    State(state): State<AppState>,
    Requester(requester): Requester,
    ValidatedQuery(query): ValidatedQuery<ReactionsQuery>,
) -> ApiResult<Json<ReactionsViewResponse>> {
    let parent = query.parent_ref()?;
    let (page, per_page) = query.page_params();

    let view = ReactionQueryService::new(state.service_context())
        .get_reactions(&requester, parent, page, per_page)
        .await?;

    Ok(Json(view.into()))
}

/// Add a reaction
///
/// PUT /api/v1/reactions/:parent_type/:parent_id/:reaction_type
#[utoipa::path(
    put,
    path = "/api/v1/reactions/{parent_type}/{parent_id}/{reaction_type}",
    tag = "reactions",
    params(
        ("parent_type" = String, Path, description = "Parent discriminator, e.g. `Post`"),
        ("parent_id" = String, Path, description = "Parent id"),
        ("reaction_type" = String, Path, description = "Reaction type, e.g. `like`")
    ),
    responses(
        (status = 204, description = "Reaction present"),
        (status = 400, description = "Unknown reaction type", body = ErrorBody),
        (status = 403, description = "Requester may not react", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn add_reaction(
    State(state): State<AppState>,
    Requester(requester): Requester,
    ValidatedPath(path): ValidatedPath<ReactionPath>,
) -> ApiResult<NoContent> {
    let parent = path.parent_ref()?;
    let reaction_type = reaction_type(&path)?;

    ReactionService::new(state.service_context())
        .add_reaction(&requester, parent, reaction_type)
        .await?;

    Ok(NoContent)
}

/// Remove a reaction
///
/// DELETE /api/v1/reactions/:parent_type/:parent_id/:reaction_type
#[utoipa::path(
    delete,
    path = "/api/v1/reactions/{parent_type}/{parent_id}/{reaction_type}",
    tag = "reactions",
    params(
        ("parent_type" = String, Path, description = "Parent discriminator, e.g. `Post`"),
        ("parent_id" = String, Path, description = "Parent id"),
        ("reaction_type" = String, Path, description = "Reaction type, e.g. `like`")
    ),
    responses(
        (status = 204, description = "Reaction absent"),
        (status = 400, description = "Unknown reaction type", body = ErrorBody),
        (status = 403, description = "Requester may not react", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn remove_reaction(
    State(state): State<AppState>,
    Requester(requester): Requester,
    ValidatedPath(path): ValidatedPath<ReactionPath>,
) -> ApiResult<NoContent> {
    let parent = path.parent_ref()?;
    let reaction_type = reaction_type(&path)?;

    ReactionService::new(state.service_context())
        .remove_reaction(&requester, parent, reaction_type)
        .await?;

    Ok(NoContent)
}

/// Remove every reaction on a parent (moderators and admins)
///
/// DELETE /api/v1/reactions/:parent_type/:parent_id
#[utoipa::path(
    delete,
    path = "/api/v1/reactions/{parent_type}/{parent_id}",
    tag = "reactions",
    params(
        ("parent_type" = String, Path, description = "Parent discriminator, e.g. `Post`"),
        ("parent_id" = String, Path, description = "Parent id")
    ),
    responses(
        (status = 204, description = "All reactions removed"),
        (status = 403, description = "Requester may not moderate", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn remove_all_reactions(
    State(state): State<AppState>,
    Requester(requester): Requester,
    ValidatedPath(path): ValidatedPath<ReactionPath>,
) -> ApiResult<NoContent> {
    let parent = path.parent_ref()?;

    ReactionService::new(state.service_context())
        .remove_all_reactions(&requester, parent)
        .await?;

    Ok(NoContent)
}

fn reaction_type(path: &ReactionPath) -> Result<&str, ApiError> {
    path.reaction_type
        .as_deref()
        .ok_or_else(|| ApiError::invalid_path("missing reaction type"))
}
