//! Key-value store errors

use thiserror::Error;

/// Errors raised by the cache and session gateways
#[derive(Error, Debug)]
pub enum KvError {
    /// Could not obtain a pooled connection
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// Command failed on the server or the wire
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Stored payload could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for gateway operations
pub type KvResult<T> = Result<T, KvError>;
