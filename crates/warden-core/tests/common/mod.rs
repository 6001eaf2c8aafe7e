//! Common test utilities for warden-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{FailingSessionStore, FailingUserCache, MockUserRepository, SlowUserCache};

use std::sync::Arc;

use warden_core::{AuthConfig, AuthService};
use warden_kv::{MemorySessionStore, MemoryUserCache};
use warden_types::NewUser;

#[allow(dead_code)]
pub type TestService = AuthService<MockUserRepository, MemoryUserCache, MemorySessionStore>;

/// Service wired to in-memory backends, with handles for inspection
#[allow(dead_code)]
pub struct Harness {
    pub service: TestService,
    pub users: Arc<MockUserRepository>,
    pub cache: Arc<MemoryUserCache>,
    pub sessions: Arc<MemorySessionStore>,
}

#[allow(dead_code)]
pub fn harness() -> Harness {
    harness_with(AuthConfig::default())
}

#[allow(dead_code)]
pub fn harness_with(config: AuthConfig) -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let cache = Arc::new(MemoryUserCache::new());
    let sessions = Arc::new(MemorySessionStore::new());
    Harness {
        service: AuthService::new(
            config,
            Arc::clone(&users),
            Arc::clone(&cache),
            Arc::clone(&sessions),
        ),
        users,
        cache,
        sessions,
    }
}

#[allow(dead_code)]
pub fn new_user(email: &str, password: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        role: "user".to_string(),
        avatar: None,
        password: password.to_string(),
    }
}
