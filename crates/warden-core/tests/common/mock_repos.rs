//! Mock gateways for testing

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use warden_db::{CreateUser, DbError, DbResult, UserRepository, UserRow};
use warden_kv::{KvError, KvResult, SessionStore, UserCache};
use warden_types::{Session, SessionId, User, UserId};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
    find_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every subsequent call fail with a backend error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn get_row(&self, id: Uuid) -> Option<UserRow> {
        self.users.get(&id).map(|r| r.value().clone())
    }

    /// Insert a row directly, bypassing uniqueness checks
    pub fn insert_row(&self, row: UserRow) {
        self.by_email.insert(row.email.clone(), row.id);
        self.users.insert(row.id, row);
    }

    /// Build a row with the given email and stored hash
    pub fn test_row(email: &str, password_hash: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role: "user".to_string(),
            avatar: None,
            password: password_hash.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn enter(&self) -> DbResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        Ok(self.get_row(id))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        let id = Uuid::new_v4();
        // Mirrors the UNIQUE(email) constraint
        match self.by_email.entry(user.email.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(DbError::UniqueViolation {
                    constraint: "users_email_key".to_string(),
                })
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let now = Utc::now();
        let row = UserRow {
            id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            avatar: user.avatar,
            password: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, row.clone());
        Ok(row)
    }
}

fn backend_down() -> KvError {
    let err = serde_json::from_str::<()>("backend unavailable").unwrap_err();
    KvError::Serialization(err)
}

/// User cache whose backend is always unavailable
#[derive(Default)]
pub struct FailingUserCache {
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
}

#[async_trait]
impl UserCache for FailingUserCache {
    async fn get(&self, _id: UserId) -> KvResult<Option<User>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Err(backend_down())
    }

    async fn set(&self, _id: UserId, _user: &User, _ttl: Duration) -> KvResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        Err(backend_down())
    }

    async fn delete(&self, _id: UserId) -> KvResult<()> {
        Err(backend_down())
    }
}

/// User cache that always misses and stalls on writes
pub struct SlowUserCache {
    pub write_delay: Duration,
    pub set_calls: AtomicUsize,
}

#[allow(dead_code)]
impl SlowUserCache {
    pub fn new(write_delay: Duration) -> Self {
        Self {
            write_delay,
            set_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UserCache for SlowUserCache {
    async fn get(&self, _id: UserId) -> KvResult<Option<User>> {
        Ok(None)
    }

    async fn set(&self, _id: UserId, _user: &User, _ttl: Duration) -> KvResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.write_delay).await;
        Ok(())
    }

    async fn delete(&self, _id: UserId) -> KvResult<()> {
        Ok(())
    }
}

/// Session store whose backend is always unavailable
#[derive(Default)]
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn create(&self, _session: &Session, _ttl: Duration) -> KvResult<SessionId> {
        Err(backend_down())
    }

    async fn get(&self, _token: &SessionId) -> KvResult<Option<Session>> {
        Err(backend_down())
    }

    async fn delete(&self, _token: &SessionId) -> KvResult<()> {
        Err(backend_down())
    }
}
