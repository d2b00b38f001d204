//! Machine location strings used as the usage-history key.
//!
//! Format: `{washer|dryer}:{floor}:{pos}`, e.g. `washer:2:0`. Parsing is the
//! only way to build a [`Location`] from text, so an invalid string can never
//! reach the usage table.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::machine::MachineType;
use crate::types::Slot;

/// Pattern every location string must match.
pub const LOCATION_PATTERN: &str = r"^(washer|dryer):(\d+):(\d+)$";

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOCATION_PATTERN).expect("location pattern is a valid regex"));

/// Where a machine lives and what kind of machine it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    pub machine_type: MachineType,
    pub slot: Slot,
}

impl Location {
    /// Build a location from already-typed parts.
    ///
    /// Fails when the slot has negative coordinates, which the string form
    /// cannot represent.
    pub fn new(machine_type: MachineType, slot: Slot) -> Result<Self, CoreError> {
        slot.validate()?;
        Ok(Self { machine_type, slot })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.machine_type, self.slot.floor, self.slot.pos
        )
    }
}

impl FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = LOCATION_RE
            .captures(s)
            .ok_or_else(|| CoreError::Validation(format!("loc format is invalid: '{s}'")))?;

        let machine_type: MachineType = caps[1].parse()?;
        let floor = parse_component(&caps[2], "floor", s)?;
        let pos = parse_component(&caps[3], "pos", s)?;

        Ok(Self {
            machine_type,
            slot: Slot::new(floor, pos),
        })
    }
}

fn parse_component(raw: &str, name: &str, full: &str) -> Result<i32, CoreError> {
    raw.parse().map_err(|_| {
        CoreError::Validation(format!("loc {name} out of range in '{full}'"))
    })
}

impl TryFrom<String> for Location {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.to_string()
    }
}
