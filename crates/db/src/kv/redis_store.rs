use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, AsyncIter, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, Script};

use super::KvStore;
use crate::error::StoreResult;

/// Atomically replace `KEYS[1]` with `ARGV[2]` if it currently holds `ARGV[1]`.
const COMPARE_AND_SWAP_LUA: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2])
    return 1
end
return 0
"#;

/// Connection parameters for the Redis server holding live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: i64,
    /// `None` when the server has no `requirepass`.
    pub password: Option<String>,
}

impl RedisConfig {
    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

/// [`KvStore`] backed by Redis.
///
/// Holds a [`ConnectionManager`], which multiplexes one connection and
/// reconnects on failure; cloning it per call is cheap.
pub struct RedisKvStore {
    manager: ConnectionManager,
    cas_script: Script,
}

impl RedisKvStore {
    /// Open a managed connection. Fails if the first connection attempt does.
    pub async fn connect(config: &RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.connection_info())?;
        let manager = client.get_connection_manager().await?;
        tracing::info!(host = %config.host, port = config.port, db = config.db, "Connected to Redis");
        Ok(Self {
            manager,
            cas_script: Script::new(COMPARE_AND_SWAP_LUA),
        })
    }
}

/// Escape glob metacharacters so a key prefix matches literally in `SCAN MATCH`.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut con = self.manager.clone();
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut con = self.manager.clone();
        let _: () = con.set(key, value).await?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut con = self.manager.clone();
        let created: bool = con.set_nx(key, value).await?;
        Ok(created)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        value: &str,
    ) -> StoreResult<bool> {
        let mut con = self.manager.clone();
        let swapped: i64 = self
            .cas_script
            .key(key)
            .arg(expected)
            .arg(value)
            .invoke_async(&mut con)
            .await?;
        Ok(swapped == 1)
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut con = self.manager.clone();
        let removed: i64 = con.del(key).await?;
        Ok(removed > 0)
    }

    async fn scan_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
        let mut con = self.manager.clone();
        let pattern = format!("{}*", escape_glob(prefix));

        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter: AsyncIter<'_, String> = con.scan_match(&pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        keys.sort();
        keys.dedup();

        let values: Vec<Option<String>> = con.mget(&keys).await?;

        // Keys deleted between SCAN and MGET come back as nil.
        Ok(keys
            .into_iter()
            .zip(values)
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut con = self.manager.clone();
        let _pong: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(())
    }
}
