use std::sync::Arc;

use laundry_db::Stores;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Key-value store and usage table handles.
    pub stores: Stores,
    /// Server configuration (API key, timeouts).
    pub config: Arc<ServerConfig>,
}
