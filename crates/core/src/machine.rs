//! Machine records and their state-transition rules.
//!
//! Transitions are pure: they take the current record plus "now" and return
//! the next record (and, for `stop`, the usage record to persist). Storage
//! and clocks live in the callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::location::Location;
use crate::types::{Slot, Timestamp};
use crate::usage::UsageRecord;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of machine occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    Washer,
    Dryer,
}

impl MachineType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Washer => "washer",
            Self::Dryer => "dryer",
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "washer" => Ok(Self::Washer),
            "dryer" => Ok(Self::Dryer),
            other => Err(CoreError::Validation(format!(
                "Invalid machine type '{other}'. Must be one of: washer, dryer"
            ))),
        }
    }
}

/// Operational state of a machine.
///
/// `Unknown` doubles as "out of service".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Free,
    Busy,
    Unknown,
}

// ---------------------------------------------------------------------------
// Machine record
// ---------------------------------------------------------------------------

/// One washer or dryer, as stored in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub floor: i32,
    pub pos: i32,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub status: MachineStatus,
    pub last_started_at: Option<Timestamp>,
}

/// Result of stopping a machine: the idle record and, when a busy interval
/// actually ended, the usage record describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTransition {
    pub machine: Machine,
    pub usage: Option<UsageRecord>,
}

impl Machine {
    /// A freshly registered machine: free, never started.
    pub fn new(slot: Slot, machine_type: MachineType) -> Self {
        Self {
            floor: slot.floor,
            pos: slot.pos,
            machine_type,
            status: MachineStatus::Free,
            last_started_at: None,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.floor, self.pos)
    }

    pub fn location(&self) -> Result<Location, CoreError> {
        Location::new(self.machine_type, self.slot())
    }

    pub fn is_busy(&self) -> bool {
        self.status == MachineStatus::Busy
    }

    /// Mark the machine busy as of `now`.
    ///
    /// Starting a machine that is already busy returns it unchanged so the
    /// original start timestamp (and therefore the recorded interval) is kept.
    pub fn start(&self, now: Timestamp) -> Machine {
        if self.is_busy() {
            return self.clone();
        }
        Machine {
            status: MachineStatus::Busy,
            last_started_at: Some(now),
            ..self.clone()
        }
    }

    /// Mark the machine free as of `now`.
    ///
    /// A usage record is produced only when the machine was busy with a known
    /// start time. `stopped_at` never precedes `started_at`, even if the
    /// clock that produced `now` lags the one that recorded the start.
    pub fn stop(&self, now: Timestamp) -> Result<StopTransition, CoreError> {
        let usage = match (self.status, self.last_started_at) {
            (MachineStatus::Busy, Some(started_at)) => Some(UsageRecord::new(
                self.location()?,
                started_at,
                now.max(started_at),
            )?),
            _ => None,
        };

        Ok(StopTransition {
            machine: Machine {
                status: MachineStatus::Free,
                ..self.clone()
            },
            usage,
        })
    }
}
