//! Gateway traits
//!
//! A miss is `Ok(None)`, never an error, so callers can tell an absent entry
//! apart from an unavailable backend.

use std::time::Duration;

use async_trait::async_trait;
use warden_types::{Session, SessionId, User, UserId};

use crate::error::KvResult;

/// Time-boxed projection of user records keyed by id
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Fetch a cached record
    async fn get(&self, id: UserId) -> KvResult<Option<User>>;

    /// Store a record, overwriting any previous entry
    async fn set(&self, id: UserId, user: &User, ttl: Duration) -> KvResult<()>;

    /// Drop a record; absent entries are not an error
    async fn delete(&self, id: UserId) -> KvResult<()>;
}

/// Opaque session records with backend-enforced expiry
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a session under its token and return the token
    async fn create(&self, session: &Session, ttl: Duration) -> KvResult<SessionId>;

    /// Look up a live session
    async fn get(&self, token: &SessionId) -> KvResult<Option<Session>>;

    /// Remove a session; absent tokens are not an error
    async fn delete(&self, token: &SessionId) -> KvResult<()>;
}
