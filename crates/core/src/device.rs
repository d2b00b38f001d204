//! Sensor device identifiers.

use crate::error::CoreError;

/// Longest device identifier accepted for a binding.
pub const MAX_DEVICE_ID_LEN: usize = 128;

/// Validate an ESP32 device identifier.
///
/// Identifiers become part of a storage key, so they must be non-empty,
/// bounded and free of whitespace.
pub fn validate_device_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() {
        return Err(CoreError::Validation(
            "Device id must not be empty".to_string(),
        ));
    }
    if id.len() > MAX_DEVICE_ID_LEN {
        return Err(CoreError::Validation(format!(
            "Device id exceeds {MAX_DEVICE_ID_LEN} characters"
        )));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Device id '{id}' must not contain whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mac_style_id() {
        assert!(validate_device_id("24:6F:28:AA:BB:CC").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(validate_device_id("").is_err());
    }

    #[test]
    fn rejects_whitespace() {
        assert!(validate_device_id("esp 1").is_err());
    }

    #[test]
    fn rejects_too_long() {
        let id = "a".repeat(MAX_DEVICE_ID_LEN + 1);
        assert!(validate_device_id(&id).is_err());
    }
}
