//! Key layout in the key-value store.
//!
//! ```text
//! machine:{floor}:{pos}   JSON Machine
//! esp32:{device_id}       JSON {floor, pos}
//! raspi:{floor}           JSON Raspi
//! ```

use laundry_core::types::Slot;

pub const MACHINE_PREFIX: &str = "machine:";
pub const DEVICE_PREFIX: &str = "esp32:";
pub const RASPI_PREFIX: &str = "raspi:";

pub fn machine_key(slot: Slot) -> String {
    format!("{MACHINE_PREFIX}{}:{}", slot.floor, slot.pos)
}

/// Prefix covering every machine on `floor`. The trailing `:` keeps floor 1
/// from matching floor 10.
pub fn machine_floor_prefix(floor: i32) -> String {
    format!("{MACHINE_PREFIX}{floor}:")
}

pub fn device_key(device_id: &str) -> String {
    format!("{DEVICE_PREFIX}{device_id}")
}

pub fn raspi_key(floor: i32) -> String {
    format!("{RASPI_PREFIX}{floor}")
}
