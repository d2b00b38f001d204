//! Device binding DTOs.

use laundry_core::types::Slot;
use serde::{Deserialize, Serialize};

/// DTO for binding an ESP32 to the slot it monitors (`?id=&floor=&pos=`).
#[derive(Debug, Clone, Deserialize)]
pub struct BindDevice {
    pub id: String,
    pub floor: i32,
    pub pos: i32,
}

impl BindDevice {
    pub fn slot(&self) -> Slot {
        Slot::new(self.floor, self.pos)
    }
}

/// A resolved binding as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceBinding {
    pub id: String,
    pub floor: i32,
    pub pos: i32,
}
