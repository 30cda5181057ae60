//! Requester extractor
//!
//! A request without an `Authorization` header comes from a visitor. A header
//! that is present must carry a valid bearer token.

use agora_core::RequesterContext;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::response::ApiError;
use crate::state::AppState;

/// Identity and role of whoever sent the request
#[derive(Debug, Clone)]
pub struct Requester(pub RequesterContext);

#[async_trait]
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Requester(RequesterContext::visitor()));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InvalidAuthFormat)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_token(bearer.token())
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected bearer token"))?;

        Ok(Requester(claims.requester()?))
    }
}
