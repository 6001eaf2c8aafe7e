//! Redis user cache

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use warden_types::{User, UserId};

use super::{ttl_secs, RedisPool};
use crate::error::KvResult;
use crate::store::UserCache;

const KEY_PREFIX: &str = "user";

/// User cache storing sanitized JSON projections under `user:{id}`
#[derive(Clone)]
pub struct RedisUserCache {
    pool: RedisPool,
}

impl RedisUserCache {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(id: UserId) -> String {
        format!("{KEY_PREFIX}:{id}")
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, id: UserId) -> KvResult<Option<User>> {
        let mut conn = self.pool.get().await?;
        let data: Option<Vec<u8>> = conn.get(Self::key(id)).await?;

        match data {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, id: UserId, user: &User, ttl: Duration) -> KvResult<()> {
        let bytes = serde_json::to_vec(user)?;
        let mut conn = self.pool.get().await?;
        let _: () = conn.set_ex(Self::key(id), bytes, ttl_secs(ttl)).await?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> KvResult<()> {
        let mut conn = self.pool.get().await?;
        let _: () = conn.del(Self::key(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let id = UserId::parse("63dc333d-0863-4e9d-899e-bfc7a2ce9217").unwrap();
        assert_eq!(
            RedisUserCache::key(id),
            "user:63dc333d-0863-4e9d-899e-bfc7a2ce9217"
        );
    }
}
