//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::UserRow;

/// User repository trait
///
/// Lookups return `Ok(None)` when no row matches; `Err` is reserved for
/// backend faults.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    ///
    /// A second insert for the same email fails with
    /// [`DbError::UniqueViolation`](crate::DbError::UniqueViolation).
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;
}

/// Create user input
///
/// `password_hash` must already be the one-way hash; this type never carries
/// a plaintext password.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub password_hash: String,
}
