//! Device-identified request extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use laundry_core::types::Slot;
use laundry_db::repositories::DeviceRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the ESP32's unique id.
pub const DEVICE_ID_HEADER: &str = "x-esp-id";

/// The slot monitored by the device that sent the request.
///
/// A missing header or an unbound device id is the caller's fault and
/// rejects with 400, not 404.
#[derive(Debug, Clone, Copy)]
pub struct DeviceSlot(pub Slot);

impl FromRequestParts<AppState> for DeviceSlot {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let device_id = parts
            .headers
            .get(DEVICE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("No X-Esp-32 header".into()))?;

        let slot = DeviceRepo::resolve(state.stores.kv.as_ref(), device_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(device_id, "Unbound device id");
                AppError::BadRequest("No ESP32 found with that ID".into())
            })?;

        Ok(DeviceSlot(slot))
    }
}
