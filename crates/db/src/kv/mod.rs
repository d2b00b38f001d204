//! Key-value storage seam for live state.
//!
//! - [`RedisKvStore`] -- production backend over a multiplexed Redis connection.
//! - [`MemoryKvStore`] -- in-process map for tests and local development.
//!
//! Values are opaque strings (JSON documents). Repositories own the encoding.

mod memory;
mod redis_store;

use async_trait::async_trait;

pub use self::memory::MemoryKvStore;
pub use self::redis_store::{RedisConfig, RedisKvStore};

use crate::error::StoreResult;

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Unconditional upsert.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Write only if `key` is absent. Returns `false` when the key existed.
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Replace the value at `key` only if it still equals `expected`.
    ///
    /// Returns `false` when the key is gone or holds a different value.
    async fn compare_and_swap(&self, key: &str, expected: &str, value: &str)
        -> StoreResult<bool>;

    /// Remove `key`. Returns `false` when it did not exist.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// All `(key, value)` pairs whose key starts with `prefix`, sorted by key.
    async fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>>;

    /// Round-trip to the backend.
    async fn ping(&self) -> StoreResult<()>;
}
