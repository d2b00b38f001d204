use std::fmt::Display;
use std::str::FromStr;

use laundry_db::kv::RedisConfig;
use laundry_db::{StoreBackend, StoreConfig};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `API_KEY` has a default suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared secret required on every mutating endpoint.
    pub api_key: String,
    /// Key-value store and usage table settings.
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `API_KEY`              | required                   |
    /// | `STORE_BACKEND`        | `redis`                    |
    /// | `REDIS_HOST`           | `localhost`                |
    /// | `REDIS_PORT`           | `6379`                     |
    /// | `REDIS_DB`             | `0`                        |
    /// | `REDIS_PASS`           | none                       |
    /// | `DYNAMODB_USAGE_TABLE` | `laundry-usage`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let api_key = lookup("API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing("API_KEY"))?;

        let backend: StoreBackend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: raw.clone(),
                reason,
            })?,
            None => StoreBackend::Redis,
        };

        let redis = RedisConfig {
            host: lookup("REDIS_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(&lookup, "REDIS_PORT", 6379)?,
            db: parse_or(&lookup, "REDIS_DB", 0)?,
            password: lookup("REDIS_PASS").filter(|p| !p.is_empty()),
        };

        let usage_table =
            lookup("DYNAMODB_USAGE_TABLE").unwrap_or_else(|| "laundry-usage".into());

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_key,
            store: StoreConfig {
                backend,
                redis,
                usage_table,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_api_key_is_set() {
        let config = load(&[("API_KEY", "secret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.redis.host, "localhost");
        assert_eq!(config.store.redis.port, 6379);
        assert_eq!(config.store.redis.db, 0);
        assert_eq!(config.store.redis.password, None);
        assert_eq!(config.store.usage_table, "laundry-usage");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("API_KEY")));
        assert_matches!(load(&[("API_KEY", "  ")]), Err(ConfigError::Missing("API_KEY")));
    }

    #[test]
    fn redis_settings_are_read() {
        let config = load(&[
            ("API_KEY", "k"),
            ("REDIS_HOST", "cache"),
            ("REDIS_PORT", "6380"),
            ("REDIS_DB", "2"),
            ("REDIS_PASS", "pw"),
            ("DYNAMODB_USAGE_TABLE", "usage-prod"),
        ])
        .unwrap();
        assert_eq!(config.store.redis.host, "cache");
        assert_eq!(config.store.redis.port, 6380);
        assert_eq!(config.store.redis.db, 2);
        assert_eq!(config.store.redis.password.as_deref(), Some("pw"));
        assert_eq!(config.store.usage_table, "usage-prod");
    }

    #[test]
    fn invalid_port_names_the_variable() {
        let err = load(&[("API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "PORT", .. });
    }

    #[test]
    fn memory_backend_and_origin_list() {
        let config = load(&[
            ("API_KEY", "k"),
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,,"),
        ])
        .unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn unknown_backend_rejected() {
        let err = load(&[("API_KEY", "k"), ("STORE_BACKEND", "sqlite")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { key: "STORE_BACKEND", .. });
    }
}
