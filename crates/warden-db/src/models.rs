//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use warden_types::{User, UserId};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "user_id")]
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
            avatar: row.avatar.filter(|a| !a.is_empty()),
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
