//! Usage-history storage seam.
//!
//! Usage records are append-only and keyed by `(loc, started_at)`. Writing a
//! key that already exists fails with [`StoreError::Duplicate`] and leaves the
//! stored record untouched.
//!
//! [`StoreError::Duplicate`]: crate::error::StoreError::Duplicate

mod dynamo;
mod memory;

use async_trait::async_trait;
use laundry_core::usage::UsageRecord;

pub use self::dynamo::DynamoUsageStore;
pub use self::memory::MemoryUsageStore;

use crate::error::StoreResult;

#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Persist one completed busy interval, refusing to replace an existing one.
    async fn put(&self, record: &UsageRecord) -> StoreResult<()>;

    /// Check the backing table is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
