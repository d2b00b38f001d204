//! Repository for machine records (`machine:{floor}:{pos}`).

use laundry_core::machine::{Machine, StopTransition};
use laundry_core::types::{Slot, Timestamp};

use crate::error::{StoreError, StoreResult};
use crate::keys::{machine_floor_prefix, machine_key, MACHINE_PREFIX};
use crate::kv::KvStore;
use crate::models::machine::{CreateMachine, MachineFilter, UpdateMachine};
use crate::usage::UsageStore;

/// Provides CRUD and start/stop transitions for machines.
///
/// Every read-modify-write ends in a compare-and-swap against the value that
/// was read, so a concurrent writer surfaces as
/// [`StoreError::ConcurrentModification`] instead of a lost update.
pub struct MachineRepo;

/// A machine together with the exact stored text it was decoded from.
struct Snapshot {
    raw: String,
    machine: Machine,
}

impl MachineRepo {
    /// Register a new, free machine. Fails with [`StoreError::Duplicate`] if
    /// the slot is taken.
    pub async fn create(kv: &dyn KvStore, input: &CreateMachine) -> StoreResult<Machine> {
        let slot = input.slot();
        slot.validate()?;

        let machine = Machine::new(slot, input.machine_type);
        let key = machine_key(slot);
        let created = kv
            .set_if_absent(&key, &serde_json::to_string(&machine)?)
            .await?;
        if !created {
            return Err(StoreError::Duplicate(format!(
                "Machine already exists at {slot}"
            )));
        }
        Ok(machine)
    }

    /// Find the machine at `slot`.
    pub async fn find_by_slot(kv: &dyn KvStore, slot: Slot) -> StoreResult<Option<Machine>> {
        Ok(Self::snapshot(kv, slot).await?.map(|s| s.machine))
    }

    /// List machines matching `filter`, ordered by floor then position.
    ///
    /// A floor (and position) in the filter narrows the key scan instead of
    /// reading every machine.
    pub async fn find(kv: &dyn KvStore, filter: &MachineFilter) -> StoreResult<Vec<Machine>> {
        let candidates: Vec<Machine> = match (filter.floor, filter.pos) {
            (Some(floor), Some(pos)) => Self::find_by_slot(kv, Slot::new(floor, pos))
                .await?
                .into_iter()
                .collect(),
            (Some(floor), None) => Self::decode_all(kv, &machine_floor_prefix(floor)).await?,
            _ => Self::decode_all(kv, MACHINE_PREFIX).await?,
        };

        let mut machines: Vec<Machine> = candidates
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect();
        machines.sort_by_key(Machine::slot);
        Ok(machines)
    }

    /// Apply a partial update as of `now`. Returns `None` if no machine is at
    /// `slot`.
    pub async fn update(
        kv: &dyn KvStore,
        slot: Slot,
        input: &UpdateMachine,
        now: Timestamp,
    ) -> StoreResult<Option<Machine>> {
        let Some(current) = Self::snapshot(kv, slot).await? else {
            return Ok(None);
        };
        let next = input.apply(&current.machine, now);
        Self::swap(kv, slot, &current, &next).await?;
        Ok(Some(next))
    }

    /// Mark the machine busy as of `now`. Already-busy machines are returned
    /// unchanged. Returns `None` if no machine is at `slot`.
    pub async fn start(
        kv: &dyn KvStore,
        slot: Slot,
        now: Timestamp,
    ) -> StoreResult<Option<Machine>> {
        let Some(current) = Self::snapshot(kv, slot).await? else {
            return Ok(None);
        };
        let next = current.machine.start(now);
        if next != current.machine {
            Self::swap(kv, slot, &current, &next).await?;
        }
        Ok(Some(next))
    }

    /// Mark the machine free as of `now`, recording the busy interval that
    /// just ended. Returns `None` if no machine is at `slot`.
    ///
    /// The status flips first; the usage record is written only once this
    /// caller owns the transition. A stop that loses the race writes nothing,
    /// so its retry records the interval exactly once. If the process dies
    /// between the two writes the interval is lost, never duplicated.
    pub async fn stop(
        kv: &dyn KvStore,
        usage: &dyn UsageStore,
        slot: Slot,
        now: Timestamp,
    ) -> StoreResult<Option<StopTransition>> {
        let Some(current) = Self::snapshot(kv, slot).await? else {
            return Ok(None);
        };
        let transition = current.machine.stop(now)?;

        if transition.machine != current.machine {
            Self::swap(kv, slot, &current, &transition.machine).await?;
        }
        if let Some(record) = &transition.usage {
            match usage.put(record).await {
                Ok(()) => {}
                Err(StoreError::Duplicate(key)) => {
                    tracing::warn!(%key, "Usage interval already recorded; keeping the original");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Some(transition))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn snapshot(kv: &dyn KvStore, slot: Slot) -> StoreResult<Option<Snapshot>> {
        let Some(raw) = kv.get(&machine_key(slot)).await? else {
            return Ok(None);
        };
        let machine = serde_json::from_str(&raw)?;
        Ok(Some(Snapshot { raw, machine }))
    }

    async fn decode_all(kv: &dyn KvStore, prefix: &str) -> StoreResult<Vec<Machine>> {
        kv.scan_prefix(prefix)
            .await?
            .into_iter()
            .map(|(_, raw)| serde_json::from_str(&raw).map_err(StoreError::from))
            .collect()
    }

    async fn swap(
        kv: &dyn KvStore,
        slot: Slot,
        current: &Snapshot,
        next: &Machine,
    ) -> StoreResult<()> {
        let key = machine_key(slot);
        let swapped = kv
            .compare_and_swap(&key, &current.raw, &serde_json::to_string(next)?)
            .await?;
        if !swapped {
            return Err(StoreError::ConcurrentModification(format!(
                "Machine at {slot}"
            )));
        }
        Ok(())
    }
}
