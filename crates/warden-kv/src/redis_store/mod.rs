//! Redis-backed gateways

mod session;
mod user_cache;

pub use session::RedisSessionStore;
pub use user_cache::RedisUserCache;

use std::time::Duration;

use deadpool_redis::{Config, Pool, Runtime};

use crate::error::KvResult;

/// Pooled Redis connections shared by both gateways
pub type RedisPool = Pool;

/// Build a connection pool from a `redis://` URL
pub fn create_redis_pool(url: &str, max_size: usize) -> Result<RedisPool, deadpool_redis::CreatePoolError> {
    let mut config = Config::from_url(url);
    if let Some(ref mut pool_config) = config.pool {
        pool_config.max_size = max_size;
    } else {
        config.pool = Some(deadpool_redis::PoolConfig::new(max_size));
    }
    tracing::debug!(max_size, "redis pool configured");
    config.create_pool(Some(Runtime::Tokio1))
}

/// Round-trip a PING, used by readiness checks
pub async fn ping(pool: &RedisPool) -> KvResult<()> {
    let mut conn = pool.get().await?;
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(())
}

/// Largest `EX` Redis accepts before the millisecond expiry overflows
const MAX_TTL_SECS: u64 = i64::MAX as u64 / 1000;

/// Whole seconds for `SETEX`, rounded up so an entry never expires early
fn ttl_secs(ttl: Duration) -> u64 {
    let secs = u64::try_from(ttl.as_millis().div_ceil(1000)).unwrap_or(u64::MAX);
    secs.clamp(1, MAX_TTL_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_secs_floor() {
        assert_eq!(ttl_secs(Duration::ZERO), 1);
        assert_eq!(ttl_secs(Duration::from_millis(10)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(3600)), 3600);
    }

    #[test]
    fn test_ttl_secs_rounds_up() {
        assert_eq!(ttl_secs(Duration::from_millis(1500)), 2);
        assert_eq!(ttl_secs(Duration::from_millis(2001)), 3);
    }

    #[test]
    fn test_ttl_secs_clamped() {
        assert_eq!(ttl_secs(Duration::from_secs(u64::MAX)), MAX_TTL_SECS);
    }

    #[tokio::test]
    async fn test_pool_from_url_is_lazy() {
        // Building the pool does not dial the server
        let pool = create_redis_pool("redis://127.0.0.1:6399", 4).unwrap();
        assert_eq!(pool.status().max_size, 4);
    }
}
