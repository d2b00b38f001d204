use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A `(floor, pos)` pair identifying one physical machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub floor: i32,
    pub pos: i32,
}

impl Slot {
    pub fn new(floor: i32, pos: i32) -> Self {
        Self { floor, pos }
    }

    /// Reject negative coordinates. Location strings only admit digits, so a
    /// negative floor or position could never be recorded in usage history.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.floor < 0 {
            return Err(CoreError::Validation(format!(
                "floor must be non-negative, got {}",
                self.floor
            )));
        }
        if self.pos < 0 {
            return Err(CoreError::Validation(format!(
                "pos must be non-negative, got {}",
                self.pos
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {}, pos {}", self.floor, self.pos)
    }
}
