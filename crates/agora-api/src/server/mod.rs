//! Server setup and initialization
//!
//! Builds the storage adapters named by the configuration, wires them into
//! a `ServiceContext` and serves the router.

use std::net::SocketAddr;
use std::sync::Arc;

use agora_common::{AppConfig, AppError, JwtService, StorageBackend};
use agora_db::{
    create_pool, run_migrations, MemoryBackend, PgPostRepository, PgReactionLedger,
    PgReactionProjection,
};
use agora_service::{ServiceContext, ServiceContextBuilder};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit_and_cors};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit_and_cors(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = apply_middleware(api.merge(health_routes()));
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = match config.storage {
        StorageBackend::Postgres => postgres_context(&config).await?,
        StorageBackend::Memory => {
            info!("Using in-memory storage; nothing survives a restart");
            memory_context(&MemoryBackend::new(), &config)?
        }
    };

    Ok(AppState::new(service_context, jwt_service(&config), config))
}

/// AppState over a caller-owned in-memory backend
///
/// The caller keeps a handle to the backend, so it can seed posts or inspect
/// the ledger while the server runs.
pub fn create_memory_app_state(
    config: AppConfig,
    backend: &MemoryBackend,
) -> Result<AppState, AppError> {
    let service_context = memory_context(backend, &config)?;
    Ok(AppState::new(service_context, jwt_service(&config), config))
}

fn jwt_service(config: &AppConfig) -> JwtService {
    JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry)
}

async fn postgres_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| {
            AppError::Config("database settings missing for postgres storage".to_string())
        })?;

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(db_config)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    ServiceContextBuilder::new()
        .pool(pool.clone())
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .reaction_ledger(Arc::new(PgReactionLedger::new(pool.clone())))
        .reaction_projection(Arc::new(PgReactionProjection::new(pool)))
        .storage_timeout(config.reactions.storage_timeout())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

fn memory_context(backend: &MemoryBackend, config: &AppConfig) -> Result<ServiceContext, AppError> {
    ServiceContextBuilder::new()
        .post_repo(backend.posts.clone())
        .reaction_ledger(backend.ledger.clone())
        .reaction_projection(backend.projection.clone())
        .storage_timeout(config.reactions.storage_timeout())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| {
            AppError::Config(format!("Invalid listen address {}: {e}", config.api.address()))
        })?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
