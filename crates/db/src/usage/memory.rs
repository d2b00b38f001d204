use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use async_trait::async_trait;
use laundry_core::types::Timestamp;
use laundry_core::usage::UsageRecord;
use tokio::sync::RwLock;

use super::UsageStore;
use crate::error::{StoreError, StoreResult};

/// In-memory [`UsageStore`] with the same `(loc, started_at)` keying as the
/// DynamoDB table.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    records: RwLock<BTreeMap<(String, Timestamp), UsageRecord>>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, ordered by location then start time.
    pub async fn records(&self) -> Vec<UsageRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn put(&self, record: &UsageRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        match records.entry((record.loc.to_string(), record.started_at)) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(format!(
                "Usage at {} started {}",
                record.loc, record.started_at
            ))),
            Entry::Vacant(entry) => {
                entry.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use laundry_core::location::Location;

    use super::*;

    #[tokio::test]
    async fn recorded_interval_is_never_replaced() {
        let store = MemoryUsageStore::new();
        let loc: Location = "washer:1:0".parse().unwrap();
        let start = Utc::now();

        let first = UsageRecord::new(loc, start, start + Duration::minutes(30)).unwrap();
        let later = UsageRecord::new(loc, start, start + Duration::minutes(90)).unwrap();
        store.put(&first).await.unwrap();
        assert_matches!(store.put(&later).await, Err(StoreError::Duplicate(_)));

        assert_eq!(store.records().await, vec![first]);
    }

    #[tokio::test]
    async fn distinct_intervals_are_kept() {
        let store = MemoryUsageStore::new();
        let loc: Location = "dryer:1:0".parse().unwrap();
        let start = Utc::now();

        for offset in [0, 60, 120] {
            let s = start + Duration::minutes(offset);
            let rec = UsageRecord::new(loc, s, s + Duration::minutes(40)).unwrap();
            store.put(&rec).await.unwrap();
        }
        assert_eq!(store.records().await.len(), 3);
    }
}
