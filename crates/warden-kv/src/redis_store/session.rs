//! Redis session store

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use warden_types::{Session, SessionId};

use super::{ttl_secs, RedisPool};
use crate::error::KvResult;
use crate::store::SessionStore;

const KEY_PREFIX: &str = "session";

/// Session store keeping `{session_id, user_id}` JSON under `session:{token}`
///
/// Expiry is left entirely to Redis; nothing here sweeps old keys.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(token: &SessionId) -> String {
        format!("{KEY_PREFIX}:{}", token.as_str())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, session: &Session, ttl: Duration) -> KvResult<SessionId> {
        let bytes = serde_json::to_vec(session)?;
        let mut conn = self.pool.get().await?;
        let _: () = conn
            .set_ex(Self::key(&session.session_id), bytes, ttl_secs(ttl))
            .await?;
        Ok(session.session_id.clone())
    }

    async fn get(&self, token: &SessionId) -> KvResult<Option<Session>> {
        let mut conn = self.pool.get().await?;
        let data: Option<Vec<u8>> = conn.get(Self::key(token)).await?;

        match data {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, token: &SessionId) -> KvResult<()> {
        let mut conn = self.pool.get().await?;
        let _: () = conn.del(Self::key(token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(
            RedisSessionStore::key(&SessionId::new("abc")),
            "session:abc"
        );
    }
}
