//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the token validator and configuration.

use std::sync::Arc;

use agora_common::{AppConfig, JwtService};
use agora_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        jwt_service: JwtService,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            jwt_service: Arc::new(jwt_service),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the bearer token validator
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("jwt_service", &self.jwt_service)
            .field("config", &"AppConfig")
            .finish()
    }
}
