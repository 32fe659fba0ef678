//! Shared application state for Axum handlers.

use std::sync::Arc;

use crate::config::{JwtConfig, Settings};
use crate::db::AsyncDbPool;
use crate::external::boards::BoardRegistry;
use crate::repositories::Repositories;
use crate::services::Services;

/// Handler-facing state. Cloning is cheap since the services and the
/// pool are `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub db_pool: AsyncDbPool,
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Wires repositories, the board registry and the service layer
    /// from a pool and the loaded settings.
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        let registry = Arc::new(BoardRegistry::from_config(&settings.boards));
        let services = Services::new(repos, registry, settings);
        Self {
            services,
            db_pool: pool,
            jwt_config: settings.jwt.clone(),
        }
    }
}
