//! Application state

use std::sync::Arc;

use warden_core::AuthService;
use warden_db::{DbPool, PgUserRepository};
use warden_kv::RedisPool;

use crate::config::Config;

/// Auth service over the Postgres user store and the selected KV gateways
pub type AuthServiceImpl<C, S> = AuthService<PgUserRepository, C, S>;

/// State shared by the HTTP health handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: DbPool,
    /// Redis pool, when Redis backs the cache and sessions
    pub redis: Option<RedisPool>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: DbPool, redis: Option<RedisPool>, config: Config) -> Self {
        Self {
            pool,
            redis,
            config: Arc::new(config),
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
