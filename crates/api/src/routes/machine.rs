//! Route definitions for machines, mounted at `/machine`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::machine;
use crate::state::AppState;

/// ```text
/// POST /            -> create_machine
/// GET  /            -> list_machines
/// PUT  /            -> update_machine
/// PUT  /start       -> start_machine
/// PUT  /stop        -> stop_machine
/// PUT  /v2          -> update_machine_by_device
/// PUT  /v2/start    -> start_machine_by_device
/// PUT  /v2/stop     -> stop_machine_by_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(machine::list_machines)
                .post(machine::create_machine)
                .put(machine::update_machine),
        )
        .route("/start", put(machine::start_machine))
        .route("/stop", put(machine::stop_machine))
        .route("/v2", put(machine::update_machine_by_device))
        .route("/v2/start", put(machine::start_machine_by_device))
        .route("/v2/stop", put(machine::stop_machine_by_device))
}
