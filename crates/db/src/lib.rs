//! Storage layer: live state in a key-value store, usage history in a table.

pub mod error;
pub mod keys;
pub mod kv;
pub mod models;
pub mod repositories;
pub mod usage;

use std::str::FromStr;
use std::sync::Arc;

use error::StoreResult;
use kv::{KvStore, MemoryKvStore, RedisConfig, RedisKvStore};
use usage::{DynamoUsageStore, MemoryUsageStore, UsageStore};

/// Which backends to wire up at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Redis for live state, DynamoDB for usage history.
    Redis,
    /// Everything in process memory; state is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected redis or memory)")),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis: RedisConfig,
    /// DynamoDB table receiving usage records.
    pub usage_table: String,
}

/// Handles to both stores. Cheap to clone.
#[derive(Clone)]
pub struct Stores {
    pub kv: Arc<dyn KvStore>,
    pub usage: Arc<dyn UsageStore>,
}

impl Stores {
    pub fn new(kv: Arc<dyn KvStore>, usage: Arc<dyn UsageStore>) -> Self {
        Self { kv, usage }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryKvStore::new()),
            Arc::new(MemoryUsageStore::new()),
        )
    }

    /// Connect to the backends named in `config`.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory stores; state will not survive a restart");
                Ok(Self::in_memory())
            }
            StoreBackend::Redis => {
                let kv = RedisKvStore::connect(&config.redis).await?;
                let usage = DynamoUsageStore::from_env(config.usage_table.clone()).await;
                Ok(Self::new(Arc::new(kv), Arc::new(usage)))
            }
        }
    }
}

/// Reachability of each store, as reported by [`health_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    pub kv_healthy: bool,
    pub usage_healthy: bool,
}

impl StoreHealth {
    pub fn is_healthy(&self) -> bool {
        self.kv_healthy && self.usage_healthy
    }
}

/// Ping both stores. Failures are logged and reported, never propagated.
pub async fn health_check(stores: &Stores) -> StoreHealth {
    let kv_healthy = match stores.kv.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Key-value store health check failed");
            false
        }
    };
    let usage_healthy = match stores.usage.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Usage store health check failed");
            false
        }
    };
    StoreHealth {
        kv_healthy,
        usage_healthy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("Redis".parse::<StoreBackend>(), Ok(StoreBackend::Redis));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[tokio::test]
    async fn in_memory_stores_are_healthy() {
        let health = health_check(&Stores::in_memory()).await;
        assert!(health.is_healthy());
    }
}
