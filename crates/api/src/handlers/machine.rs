//! Handlers for machine registration, lookup, and busy/free transitions.
//!
//! Every mutation exists twice: addressed by `?floor=&pos=` for operators, and
//! addressed by the `x-esp-id` header (`/machine/v2/...`) for the ESP32 that
//! watches the machine.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use laundry_core::error::CoreError;
use laundry_core::machine::Machine;
use laundry_core::types::Slot;
use laundry_db::models::machine::{CreateMachine, MachineFilter, UpdateMachine};
use laundry_db::repositories::MachineRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::RequireApiKey;
use crate::middleware::device::DeviceSlot;
use crate::query::SlotParams;
use crate::state::AppState;

fn machine_not_found(slot: Slot) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Machine",
        key: slot.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// POST /machine
///
/// Register a machine at an empty slot. It starts out free.
pub async fn create_machine(
    _: RequireApiKey,
    State(state): State<AppState>,
    Json(input): Json<CreateMachine>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::create(state.stores.kv.as_ref(), &input).await?;

    tracing::info!(
        floor = machine.floor,
        pos = machine.pos,
        machine_type = %machine.machine_type,
        "Machine registered",
    );

    Ok((StatusCode::CREATED, Json(machine)))
}

/// GET /machine
///
/// List machines, optionally filtered by `status`, `floor`, `pos` and `type`.
pub async fn list_machines(
    State(state): State<AppState>,
    Query(filter): Query<MachineFilter>,
) -> AppResult<impl IntoResponse> {
    let machines = MachineRepo::find(state.stores.kv.as_ref(), &filter).await?;
    Ok(Json(machines))
}

/// PUT /machine?floor=&pos=
pub async fn update_machine(
    _: RequireApiKey,
    State(state): State<AppState>,
    Query(params): Query<SlotParams>,
    Json(input): Json<UpdateMachine>,
) -> AppResult<impl IntoResponse> {
    update_at(&state, params.slot(), &input).await
}

/// PUT /machine/v2
pub async fn update_machine_by_device(
    _: RequireApiKey,
    DeviceSlot(slot): DeviceSlot,
    State(state): State<AppState>,
    Json(input): Json<UpdateMachine>,
) -> AppResult<impl IntoResponse> {
    update_at(&state, slot, &input).await
}

async fn update_at(
    state: &AppState,
    slot: Slot,
    input: &UpdateMachine,
) -> AppResult<Json<Machine>> {
    let machine = MachineRepo::update(state.stores.kv.as_ref(), slot, input, Utc::now())
        .await?
        .ok_or_else(|| machine_not_found(slot))?;

    tracing::info!(%slot, status = ?machine.status, "Machine updated");

    Ok(Json(machine))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// PUT /machine/start?floor=&pos=
pub async fn start_machine(
    _: RequireApiKey,
    State(state): State<AppState>,
    Query(params): Query<SlotParams>,
) -> AppResult<impl IntoResponse> {
    start_at(&state, params.slot()).await
}

/// PUT /machine/v2/start
pub async fn start_machine_by_device(
    _: RequireApiKey,
    DeviceSlot(slot): DeviceSlot,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    start_at(&state, slot).await
}

/// Mark the machine busy. Starting a busy machine keeps its original start time.
async fn start_at(state: &AppState, slot: Slot) -> AppResult<(StatusCode, Json<Machine>)> {
    let machine = MachineRepo::start(state.stores.kv.as_ref(), slot, Utc::now())
        .await?
        .ok_or_else(|| machine_not_found(slot))?;

    tracing::info!(%slot, started_at = ?machine.last_started_at, "Machine started");

    Ok((StatusCode::ACCEPTED, Json(machine)))
}

/// PUT /machine/stop?floor=&pos=
pub async fn stop_machine(
    _: RequireApiKey,
    State(state): State<AppState>,
    Query(params): Query<SlotParams>,
) -> AppResult<impl IntoResponse> {
    stop_at(&state, params.slot()).await
}

/// PUT /machine/v2/stop
pub async fn stop_machine_by_device(
    _: RequireApiKey,
    DeviceSlot(slot): DeviceSlot,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    stop_at(&state, slot).await
}

/// Mark the machine free, recording the completed busy interval if there was one.
async fn stop_at(state: &AppState, slot: Slot) -> AppResult<(StatusCode, Json<Machine>)> {
    let transition = MachineRepo::stop(
        state.stores.kv.as_ref(),
        state.stores.usage.as_ref(),
        slot,
        Utc::now(),
    )
    .await?
    .ok_or_else(|| machine_not_found(slot))?;

    match &transition.usage {
        Some(record) => tracing::info!(
            %slot,
            loc = %record.loc,
            duration_secs = record.duration_secs(),
            "Machine stopped, usage recorded",
        ),
        None => tracing::info!(%slot, "Machine stopped, no busy interval to record"),
    }

    Ok((StatusCode::ACCEPTED, Json(transition.machine)))
}
