//! User types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new random user ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Persisted user record
///
/// `password` holds the salted hash while the record is inside the service
/// and is empty once the record has been sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Clear the password hash before the record leaves the service
    pub fn sanitize(&mut self) {
        self.password.clear();
    }

    /// Consume and return the sanitized record
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }

    /// Whether the password field has been cleared
    pub fn is_sanitized(&self) -> bool {
        self.password.is_empty()
    }
}

/// Registration candidate as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(),
            email: "a@x.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: "admin".to_string(),
            avatar: None,
            password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sanitize_clears_password() {
        let mut user = sample_user();
        assert!(!user.is_sanitized());
        user.sanitize();
        assert!(user.is_sanitized());
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_sanitized_json_has_no_password_key() {
        let user = sample_user().sanitized();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());

        // Cached projections deserialize back with an empty password
        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_user_id_parse_roundtrip() {
        let id = UserId::new();
        assert_eq!(UserId::parse(&id.to_string()).unwrap(), id);
        assert!(UserId::parse("not-a-uuid").is_err());
    }
}
