//! Handlers for the per-floor raspi registry.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use laundry_core::error::CoreError;
use laundry_db::models::raspi::{CreateRaspi, RaspiFilter, UpdateRaspi};
use laundry_db::repositories::RaspiRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::RequireApiKey;
use crate::state::AppState;

fn raspi_not_found(floor: i32) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Raspi",
        key: format!("floor {floor}"),
    })
}

/// POST /raspi
///
/// Register the raspi for a floor. Conflicts if the floor already has one.
pub async fn create_raspi(
    _: RequireApiKey,
    State(state): State<AppState>,
    Json(input): Json<CreateRaspi>,
) -> AppResult<impl IntoResponse> {
    let raspi = RaspiRepo::create(state.stores.kv.as_ref(), &input, Utc::now()).await?;

    tracing::info!(floor = raspi.floor, ip_addr = %raspi.ip_addr, "Raspi registered");

    Ok((StatusCode::CREATED, Json(raspi)))
}

/// PUT /raspi
pub async fn upsert_raspi(
    _: RequireApiKey,
    State(state): State<AppState>,
    Json(input): Json<CreateRaspi>,
) -> AppResult<impl IntoResponse> {
    let raspi = RaspiRepo::upsert(state.stores.kv.as_ref(), &input, Utc::now()).await?;

    tracing::info!(floor = raspi.floor, ip_addr = %raspi.ip_addr, "Raspi upserted");

    Ok(Json(raspi))
}

/// GET /raspi
pub async fn list_raspis(
    State(state): State<AppState>,
    Query(filter): Query<RaspiFilter>,
) -> AppResult<impl IntoResponse> {
    let raspis = RaspiRepo::find(state.stores.kv.as_ref(), &filter).await?;
    Ok(Json(raspis))
}

/// PATCH /raspi/{floor}
pub async fn update_raspi(
    _: RequireApiKey,
    State(state): State<AppState>,
    Path(floor): Path<i32>,
    Json(input): Json<UpdateRaspi>,
) -> AppResult<impl IntoResponse> {
    let raspi = RaspiRepo::update(state.stores.kv.as_ref(), floor, &input, Utc::now())
        .await?
        .ok_or_else(|| raspi_not_found(floor))?;

    tracing::info!(floor, ip_addr = %raspi.ip_addr, "Raspi updated");

    Ok(Json(raspi))
}

/// DELETE /raspi/{floor}
///
/// Returns the removed record.
pub async fn delete_raspi(
    _: RequireApiKey,
    State(state): State<AppState>,
    Path(floor): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let raspi = RaspiRepo::delete(state.stores.kv.as_ref(), floor)
        .await?
        .ok_or_else(|| raspi_not_found(floor))?;

    tracing::info!(floor, "Raspi deleted");

    Ok(Json(raspi))
}
