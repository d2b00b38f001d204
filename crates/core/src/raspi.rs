//! Per-floor Raspberry Pi gateways.

use std::net::IpAddr;

use crate::error::CoreError;

/// Validate a raspi's floor. There is at most one raspi per floor.
pub fn validate_floor(floor: i32) -> Result<(), CoreError> {
    if floor < 0 {
        return Err(CoreError::Validation(format!(
            "floor must be non-negative, got {floor}"
        )));
    }
    Ok(())
}

/// Validate that `ip_addr` is a literal IPv4 or IPv6 address.
pub fn validate_ip_addr(ip_addr: &str) -> Result<(), CoreError> {
    ip_addr.parse::<IpAddr>().map(|_| ()).map_err(|_| {
        CoreError::Validation(format!("Invalid ip_addr '{ip_addr}'"))
    })
}
