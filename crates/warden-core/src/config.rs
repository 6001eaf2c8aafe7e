//! Orchestrator tuning

use std::time::Duration;

/// Default lifetime of a cached user record
pub const DEFAULT_USER_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default lifetime of a session issued at login
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(86_400);

/// TTLs consumed by the identity and session orchestrators
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub user_cache_ttl: Duration,
    pub session_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_cache_ttl: DEFAULT_USER_CACHE_TTL,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl AuthConfig {
    pub fn with_user_cache_ttl(mut self, ttl: Duration) -> Self {
        self.user_cache_ttl = ttl;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}
