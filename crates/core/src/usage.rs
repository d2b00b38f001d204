//! Usage history entries.
//!
//! One [`UsageRecord`] describes one completed busy interval. Records are
//! identified by `(loc, started_at)` and are written once, never updated.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::location::Location;
use crate::machine::MachineType;
use crate::types::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub loc: Location,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub started_at: Timestamp,
    pub stopped_at: Timestamp,
}

impl UsageRecord {
    /// Build a record for the interval `[started_at, stopped_at]`.
    ///
    /// The machine type is taken from the location so the two can't disagree.
    pub fn new(
        loc: Location,
        started_at: Timestamp,
        stopped_at: Timestamp,
    ) -> Result<Self, CoreError> {
        if stopped_at < started_at {
            return Err(CoreError::Validation(format!(
                "stopped_at ({stopped_at}) precedes started_at ({started_at}) for {loc}"
            )));
        }
        Ok(Self {
            loc,
            machine_type: loc.machine_type,
            started_at,
            stopped_at,
        })
    }

    /// Seconds the machine was busy.
    pub fn duration_secs(&self) -> i64 {
        (self.stopped_at - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::types::Slot;

    fn loc() -> Location {
        Location::new(MachineType::Dryer, Slot::new(4, 2)).unwrap()
    }

    #[test]
    fn type_follows_location() {
        let now = Utc::now();
        let rec = UsageRecord::new(loc(), now, now).unwrap();
        assert_eq!(rec.machine_type, MachineType::Dryer);
    }

    #[test]
    fn rejects_inverted_interval() {
        let now = Utc::now();
        assert!(UsageRecord::new(loc(), now, now - Duration::seconds(1)).is_err());
    }

    #[test]
    fn duration_in_seconds() {
        let start = Utc::now();
        let rec = UsageRecord::new(loc(), start, start + Duration::minutes(50)).unwrap();
        assert_eq!(rec.duration_secs(), 3000);
    }

    #[test]
    fn json_shape() {
        let start = Utc::now();
        let rec = UsageRecord::new(loc(), start, start).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["loc"], "dryer:4:2");
        assert_eq!(json["type"], "dryer");
        assert!(json["started_at"].is_string());
        assert!(json["stopped_at"].is_string());
    }
}
