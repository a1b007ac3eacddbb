use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference counted, config is behind `Arc`).
/// Handlers never hold a connection themselves; each repository call checks
/// one out of the pool and returns it when done.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vaxrecord_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
