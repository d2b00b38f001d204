//! Route definitions for ESP32 bindings, mounted at `/esp`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::esp;
use crate::state::AppState;

/// ```text
/// POST /esp         -> bind_device
/// GET  /esp/{id}    -> get_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/esp", post(esp::bind_device))
        .route("/esp/{id}", get(esp::get_device))
}
