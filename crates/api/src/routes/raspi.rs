//! Route definitions for the raspi registry, mounted at `/raspi`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::raspi;
use crate::state::AppState;

/// ```text
/// GET    /           -> list_raspis
/// POST   /           -> create_raspi
/// PUT    /           -> upsert_raspi
/// PATCH  /{floor}    -> update_raspi
/// DELETE /{floor}    -> delete_raspi
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(raspi::list_raspis)
                .post(raspi::create_raspi)
                .put(raspi::upsert_raspi),
        )
        .route(
            "/{floor}",
            patch(raspi::update_raspi).delete(raspi::delete_raspi),
        )
}
