//! Repository for ESP32 device bindings (`esp32:{id}`).

use laundry_core::device::validate_device_id;
use laundry_core::types::Slot;

use crate::error::StoreResult;
use crate::keys::device_key;
use crate::kv::KvStore;
use crate::models::device::{BindDevice, DeviceBinding};

/// Maps sensor devices to the slot they monitor.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Bind a device to a slot, replacing any previous binding.
    pub async fn bind(kv: &dyn KvStore, input: &BindDevice) -> StoreResult<DeviceBinding> {
        validate_device_id(&input.id)?;
        let slot = input.slot();
        slot.validate()?;

        kv.set(&device_key(&input.id), &serde_json::to_string(&slot)?)
            .await?;

        Ok(DeviceBinding {
            id: input.id.clone(),
            floor: slot.floor,
            pos: slot.pos,
        })
    }

    /// Look up the slot a device is bound to.
    pub async fn resolve(kv: &dyn KvStore, device_id: &str) -> StoreResult<Option<Slot>> {
        match kv.get(&device_key(device_id)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
