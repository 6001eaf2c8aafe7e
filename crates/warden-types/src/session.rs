//! Session types

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Opaque session token
///
/// Validity is decided only by a backend lookup; the value has no structure
/// a caller could decode.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an existing token value
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tokens are bearer credentials, keep them out of logs
impl std::fmt::Debug for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "SessionId({prefix}..)")
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SessionId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Ephemeral authentication grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token the caller presents
    pub session_id: SessionId,
    /// User that authenticated
    pub user_id: UserId,
}

impl Session {
    pub fn new(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            session_id,
            user_id,
        }
    }
}
