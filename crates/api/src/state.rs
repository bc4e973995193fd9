use std::sync::Arc;

use pronostiek_core::catalog::RiderCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pronostiek_db::DbPool,
    /// Server configuration, including the per-variant rulesets.
    pub config: Arc<ServerConfig>,
    /// Rider catalog, loaded once at startup and read-only afterwards.
    pub catalog: Arc<RiderCatalog>,
}
