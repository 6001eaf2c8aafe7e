//! In-memory gateways with TTL expiry
//!
//! Entries are stamped with a [`tokio::time::Instant`] deadline and treated
//! as absent once it passes, so tests can drive expiry with
//! `tokio::time::pause` / `advance`. Expired entries are dropped lazily on
//! read; there is no background sweeper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use warden_types::{Session, SessionId, User, UserId};

use crate::error::KvResult;
use crate::store::{SessionStore, UserCache};

/// Stand-in expiry for TTLs too large to represent as an instant
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now.checked_add(ttl).unwrap_or(now + FAR_FUTURE),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Shared TTL map backing both in-memory gateways
#[derive(Debug)]
struct TtlMap<K: std::hash::Hash + Eq, V> {
    entries: DashMap<K, Entry<V>>,
}

impl<K: std::hash::Hash + Eq, V: Clone> TtlMap<K, V> {
    fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }
        None
    }

    fn insert(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key, Entry::new(value, ttl));
    }

    fn remove(&self, key: &K) {
        self.entries.remove(key);
    }

    fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_expired()).count()
    }
}

/// In-memory [`UserCache`]
#[derive(Debug, Clone)]
pub struct MemoryUserCache {
    inner: Arc<TtlMap<UserId, User>>,
}

impl MemoryUserCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TtlMap::new()),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryUserCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserCache for MemoryUserCache {
    async fn get(&self, id: UserId) -> KvResult<Option<User>> {
        Ok(self.inner.get(&id))
    }

    async fn set(&self, id: UserId, user: &User, ttl: Duration) -> KvResult<()> {
        self.inner.insert(id, user.clone(), ttl);
        Ok(())
    }

    async fn delete(&self, id: UserId) -> KvResult<()> {
        self.inner.remove(&id);
        Ok(())
    }
}

/// In-memory [`SessionStore`]
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    inner: Arc<TtlMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TtlMap::new()),
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session, ttl: Duration) -> KvResult<SessionId> {
        self.inner
            .insert(session.session_id.clone(), session.clone(), ttl);
        Ok(session.session_id.clone())
    }

    async fn get(&self, token: &SessionId) -> KvResult<Option<Session>> {
        Ok(self.inner.get(token))
    }

    async fn delete(&self, token: &SessionId) -> KvResult<()> {
        self.inner.remove(token);
        Ok(())
    }
}
