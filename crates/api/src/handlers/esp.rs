//! Handlers for binding ESP32 devices to machine slots.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use laundry_core::error::CoreError;
use laundry_db::models::device::{BindDevice, DeviceBinding};
use laundry_db::repositories::DeviceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::RequireApiKey;
use crate::state::AppState;

/// POST /esp/esp?id=&floor=&pos=
///
/// Bind (or rebind) a device to a slot. The latest binding wins.
pub async fn bind_device(
    _: RequireApiKey,
    State(state): State<AppState>,
    Query(input): Query<BindDevice>,
) -> AppResult<impl IntoResponse> {
    let binding = DeviceRepo::bind(state.stores.kv.as_ref(), &input).await?;

    tracing::info!(
        device_id = %binding.id,
        floor = binding.floor,
        pos = binding.pos,
        "Device bound",
    );

    Ok(Json(binding))
}

/// GET /esp/esp/{id}
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let slot = DeviceRepo::resolve(state.stores.kv.as_ref(), &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ESP32",
                key: id.clone(),
            })
        })?;

    Ok(Json(DeviceBinding {
        id,
        floor: slot.floor,
        pos: slot.pos,
    }))
}
