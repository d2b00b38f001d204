//! Machine DTOs. The stored entity itself is [`laundry_core::machine::Machine`].

use laundry_core::machine::{Machine, MachineStatus, MachineType};
use laundry_core::types::{Slot, Timestamp};
use serde::Deserialize;

/// DTO for registering a new machine. Status always starts as `free`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMachine {
    pub floor: i32,
    pub pos: i32,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
}

impl CreateMachine {
    pub fn slot(&self) -> Slot {
        Slot::new(self.floor, self.pos)
    }
}

/// DTO for a partial update. `None` fields are left as stored.
///
/// Prefer start/stop for status changes. Moving a machine out of `busy` here
/// records no usage history; moving it into `busy` opens a new interval.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMachine {
    #[serde(rename = "type")]
    pub machine_type: Option<MachineType>,
    pub status: Option<MachineStatus>,
}

impl UpdateMachine {
    /// Merge the present fields onto `machine`.
    ///
    /// A patch that makes an idle machine busy stamps `last_started_at` with
    /// `now`, so the next stop never reuses the key of an interval that was
    /// already recorded.
    pub fn apply(&self, machine: &Machine, now: Timestamp) -> Machine {
        let status = self.status.unwrap_or(machine.status);
        let last_started_at = if status == MachineStatus::Busy && !machine.is_busy() {
            Some(now)
        } else {
            machine.last_started_at
        };
        Machine {
            machine_type: self.machine_type.unwrap_or(machine.machine_type),
            status,
            last_started_at,
            ..machine.clone()
        }
    }
}

/// Search filter. Present fields are AND-combined; absent fields match anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineFilter {
    pub status: Option<MachineStatus>,
    pub floor: Option<i32>,
    pub pos: Option<i32>,
    #[serde(rename = "type")]
    pub machine_type: Option<MachineType>,
}

impl MachineFilter {
    pub fn matches(&self, machine: &Machine) -> bool {
        self.status.is_none_or(|s| s == machine.status)
            && self.floor.is_none_or(|f| f == machine.floor)
            && self.pos.is_none_or(|p| p == machine.pos)
            && self.machine_type.is_none_or(|t| t == machine.machine_type)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn dryer() -> Machine {
        Machine::new(Slot::new(3, 1), MachineType::Dryer)
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let m = dryer();
        assert_eq!(UpdateMachine::default().apply(&m, Utc::now()), m);
    }

    #[test]
    fn patch_into_busy_opens_a_new_interval() {
        let earlier = Utc::now() - Duration::hours(2);
        let finished = dryer()
            .start(earlier)
            .stop(earlier + Duration::minutes(40))
            .unwrap()
            .machine;

        let now = Utc::now();
        let patch = UpdateMachine {
            status: Some(MachineStatus::Busy),
            ..Default::default()
        };
        let busy = patch.apply(&finished, now);
        assert_eq!(busy.status, MachineStatus::Busy);
        assert_eq!(busy.last_started_at, Some(now));
    }

    #[test]
    fn patch_on_busy_machine_keeps_its_start() {
        let started = Utc::now() - Duration::minutes(5);
        let busy = dryer().start(started);
        let patch = UpdateMachine {
            machine_type: Some(MachineType::Washer),
            status: Some(MachineStatus::Busy),
        };
        let updated = patch.apply(&busy, Utc::now());
        assert_eq!(updated.last_started_at, Some(started));
        assert_eq!(updated.machine_type, MachineType::Washer);
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let m = dryer();
        let patch = UpdateMachine {
            machine_type: None,
            status: Some(MachineStatus::Unknown),
        };
        let updated = patch.apply(&m, Utc::now());
        assert_eq!(updated.status, MachineStatus::Unknown);
        assert_eq!(updated.machine_type, MachineType::Dryer);
        assert_eq!(updated.slot(), m.slot());
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(MachineFilter::default().matches(&dryer()));
    }

    #[test]
    fn filter_fields_are_conjunctive() {
        let m = dryer();
        let hit = MachineFilter {
            floor: Some(3),
            machine_type: Some(MachineType::Dryer),
            ..Default::default()
        };
        let miss = MachineFilter {
            floor: Some(3),
            machine_type: Some(MachineType::Washer),
            ..Default::default()
        };
        assert!(hit.matches(&m));
        assert!(!miss.matches(&m));
    }

    #[test]
    fn update_deserializes_type_key() {
        let patch: UpdateMachine = serde_json::from_str(r#"{"type":"washer"}"#).unwrap();
        assert_eq!(patch.machine_type, Some(MachineType::Washer));
        assert!(patch.status.is_none());
    }
}
