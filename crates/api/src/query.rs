//! Shared query parameter types for API handlers.

use laundry_core::types::Slot;
use serde::Deserialize;

/// Slot addressed by query string (`?floor=&pos=`).
///
/// Used by every machine endpoint that is not device-identified.
#[derive(Debug, Deserialize)]
pub struct SlotParams {
    pub floor: i32,
    pub pos: i32,
}

impl SlotParams {
    pub fn slot(&self) -> Slot {
        Slot::new(self.floor, self.pos)
    }
}
