//! Middleware stack for the API server
//!
//! Request ids, request tracing, a request timeout, CORS and a global rate limit.

use std::sync::Arc;
use std::time::Duration;

use agora_common::{AppError, CorsConfig, RateLimitConfig};
use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request id, tracing and timeout layers, shared by every route
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Outermost first: the id is set before the trace span reads it.
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("unknown");

                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    })
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            )),
    )
}

/// Global rate limit and configured CORS
///
/// Apply to the API routes only; probes stay reachable under load.
pub fn apply_rate_limit_and_cors(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Result<Router<AppState>, AppError> {
    // Global key: one bucket for the whole process, not per client IP.
    // The quota refills one request every `1000 / rps` milliseconds.
    let governor_conf = 1000_u64
        .checked_div(u64::from(rate_limit_config.requests_per_second))
        .and_then(|replenish_ms| {
            GovernorConfigBuilder::default()
                .per_millisecond(replenish_ms.max(1))
                .burst_size(rate_limit_config.burst)
                .key_extractor(GlobalKeyExtractor)
                .finish()
        })
        .ok_or_else(|| {
            AppError::Config(format!(
                "invalid rate limit: {} requests/s, burst {}",
                rate_limit_config.requests_per_second, rate_limit_config.burst
            ))
        })?;

    Ok(router
        .layer(create_cors_layer_from_config(cors_config, is_production))
        .layer(GovernorLayer {
            config: Arc::new(governor_conf),
        }))
}

/// Create CORS layer from configuration
fn create_cors_layer_from_config(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let base_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id]);

    match (config.allowed_origins.as_slice(), is_production) {
        ([], false) => {
            tracing::warn!(
                "CORS open to every origin; set CORS_ALLOWED_ORIGINS outside development"
            );
            base_layer.allow_origin(Any)
        }
        ([], true) => {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty in production; browsers will be refused");
            base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
        (origins, _) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Skipping unparsable CORS origin");
                        None
                    }
                })
                .collect();

            tracing::info!(count = origins.len(), "CORS restricted to configured origins");
            base_layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}
