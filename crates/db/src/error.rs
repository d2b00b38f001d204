use laundry_core::error::CoreError;

/// Errors raised by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain rule rejected the data being written or read back.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A set-if-absent write found the key already taken.
    #[error("Key already exists: {0}")]
    Duplicate(String),

    /// A compare-and-swap lost to a concurrent writer.
    #[error("Concurrent modification of {0}")]
    ConcurrentModification(String),

    /// A stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Redis failure (connection, protocol, script).
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Usage table failure.
    #[error("Usage table error: {0}")]
    Usage(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
