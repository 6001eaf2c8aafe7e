//! Warden KV - TTL key-value gateways
//!
//! Two narrow gateways over a key-value store with native expiry:
//!
//! - [`UserCache`] - read-through projection of user records keyed by id
//! - [`SessionStore`] - opaque session tokens mapped to the owning user
//!
//! Each has a Redis-backed implementation for deployments and an in-memory
//! implementation for tests and single-process runs.

pub mod error;
pub mod memory;
pub mod redis_store;
pub mod store;

pub use error::{KvError, KvResult};
pub use memory::{MemorySessionStore, MemoryUserCache};
pub use redis_store::{create_redis_pool, ping, RedisPool, RedisSessionStore, RedisUserCache};
pub use store::{SessionStore, UserCache};
