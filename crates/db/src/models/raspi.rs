//! Raspi entity model and DTOs.
//!
//! One Raspberry Pi gateway per floor, keyed by floor.

use laundry_core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored raspi record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raspi {
    pub floor: i32,
    pub ip_addr: String,
    pub updated_at: Timestamp,
}

/// DTO for creating or upserting a raspi. `updated_at` is set server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRaspi {
    pub floor: i32,
    pub ip_addr: String,
}

/// DTO for a partial update. `updated_at` defaults to now when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRaspi {
    pub ip_addr: Option<String>,
    pub updated_at: Option<Timestamp>,
}

/// Search filter; present fields are AND-combined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaspiFilter {
    pub floor: Option<i32>,
    pub ip_addr: Option<String>,
}

impl RaspiFilter {
    pub fn matches(&self, raspi: &Raspi) -> bool {
        self.floor.is_none_or(|f| f == raspi.floor)
            && self
                .ip_addr
                .as_deref()
                .is_none_or(|ip| ip == raspi.ip_addr)
    }
}
