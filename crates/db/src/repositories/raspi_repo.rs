//! Repository for per-floor raspis (`raspi:{floor}`).

use laundry_core::raspi::{validate_floor, validate_ip_addr};
use laundry_core::types::Timestamp;

use crate::error::{StoreError, StoreResult};
use crate::keys::{raspi_key, RASPI_PREFIX};
use crate::kv::KvStore;
use crate::models::raspi::{CreateRaspi, Raspi, RaspiFilter, UpdateRaspi};

/// Provides CRUD operations for raspis.
pub struct RaspiRepo;

impl RaspiRepo {
    /// Insert a new raspi. Fails with [`StoreError::Duplicate`] if the floor
    /// already has one.
    pub async fn create(
        kv: &dyn KvStore,
        input: &CreateRaspi,
        now: Timestamp,
    ) -> StoreResult<Raspi> {
        let raspi = Self::build(input, now)?;
        let created = kv
            .set_if_absent(&raspi_key(raspi.floor), &serde_json::to_string(&raspi)?)
            .await?;
        if !created {
            return Err(StoreError::Duplicate(format!(
                "Raspi already exists on floor {}",
                raspi.floor
            )));
        }
        Ok(raspi)
    }

    /// Insert or replace the raspi on `input.floor`.
    pub async fn upsert(
        kv: &dyn KvStore,
        input: &CreateRaspi,
        now: Timestamp,
    ) -> StoreResult<Raspi> {
        let raspi = Self::build(input, now)?;
        kv.set(&raspi_key(raspi.floor), &serde_json::to_string(&raspi)?)
            .await?;
        Ok(raspi)
    }

    pub async fn find_by_floor(kv: &dyn KvStore, floor: i32) -> StoreResult<Option<Raspi>> {
        match kv.get(&raspi_key(floor)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// List raspis matching `filter`, ordered by floor.
    pub async fn find(kv: &dyn KvStore, filter: &RaspiFilter) -> StoreResult<Vec<Raspi>> {
        let candidates: Vec<Raspi> = match filter.floor {
            Some(floor) => Self::find_by_floor(kv, floor).await?.into_iter().collect(),
            None => kv
                .scan_prefix(RASPI_PREFIX)
                .await?
                .into_iter()
                .map(|(_, raw)| serde_json::from_str(&raw).map_err(StoreError::from))
                .collect::<StoreResult<_>>()?,
        };

        let mut raspis: Vec<Raspi> = candidates
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        raspis.sort_by_key(|r| r.floor);
        Ok(raspis)
    }

    /// Update a raspi. Only non-`None` fields are applied; `updated_at`
    /// falls back to `now`.
    ///
    /// Returns `None` if no raspi exists on `floor`.
    pub async fn update(
        kv: &dyn KvStore,
        floor: i32,
        input: &UpdateRaspi,
        now: Timestamp,
    ) -> StoreResult<Option<Raspi>> {
        if let Some(ip) = &input.ip_addr {
            validate_ip_addr(ip)?;
        }

        let key = raspi_key(floor);
        let Some(raw) = kv.get(&key).await? else {
            return Ok(None);
        };
        let current: Raspi = serde_json::from_str(&raw)?;
        let next = Raspi {
            floor: current.floor,
            ip_addr: input.ip_addr.clone().unwrap_or(current.ip_addr),
            updated_at: input.updated_at.unwrap_or(now),
        };

        let swapped = kv
            .compare_and_swap(&key, &raw, &serde_json::to_string(&next)?)
            .await?;
        if !swapped {
            return Err(StoreError::ConcurrentModification(format!(
                "Raspi on floor {floor}"
            )));
        }
        Ok(Some(next))
    }

    /// Delete the raspi on `floor`, returning the removed record.
    pub async fn delete(kv: &dyn KvStore, floor: i32) -> StoreResult<Option<Raspi>> {
        let Some(raspi) = Self::find_by_floor(kv, floor).await? else {
            return Ok(None);
        };
        if !kv.delete(&raspi_key(floor)).await? {
            // Removed by someone else in between.
            return Ok(None);
        }
        Ok(Some(raspi))
    }

    fn build(input: &CreateRaspi, now: Timestamp) -> StoreResult<Raspi> {
        validate_floor(input.floor)?;
        validate_ip_addr(&input.ip_addr)?;
        Ok(Raspi {
            floor: input.floor,
            ip_addr: input.ip_addr.clone(),
            updated_at: now,
        })
    }
}
