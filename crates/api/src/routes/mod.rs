pub mod esp;
pub mod health;
pub mod machine;
pub mod raspi;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /machine                 create, list, update by slot
/// /machine/start           start by slot
/// /machine/stop            stop by slot
/// /machine/v2              update by device header
/// /machine/v2/start        start by device header
/// /machine/v2/stop         stop by device header
///
/// /esp/esp                 bind device (POST)
/// /esp/esp/{id}            resolve binding (GET)
///
/// /raspi                   create, upsert, list
/// /raspi/{floor}           update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/machine", machine::router())
        .nest("/esp", esp::router())
        .nest("/raspi", raspi::router())
}
