//! Auth errors

use thiserror::Error;
use warden_db::DbError;
use warden_kv::KvError;

/// Error taxonomy surfaced by the orchestrators
///
/// Display strings are safe to hand to callers except for `Store` and
/// `Crypto`, whose payload carries backend detail for server-side logs.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Entity absent in store, cache or session backend
    #[error("not found")]
    NotFound,

    /// Registration against an email that already has a record
    #[error("email already exists")]
    DuplicateEmail,

    /// Wrong password or unknown account
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email failed shape or length checks
    #[error("invalid email address")]
    InvalidEmail,

    /// Any other malformed input
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing or empty session context
    #[error("unauthenticated")]
    Unauthenticated,

    /// Caller cancelled the request
    #[error("request cancelled")]
    Cancelled,

    /// Caller deadline passed before the call finished
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Unexpected storage or cache fault
    #[error("store failure: {0}")]
    Store(String),

    /// Hashing or verification fault
    #[error("crypto failure: {0}")]
    Crypto(String),
}

impl AuthError {
    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Store(_) => "STORE_FAILURE",
            Self::Crypto(_) => "CRYPTO_FAILURE",
        }
    }

    /// Faults whose detail must stay server-side
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Crypto(_))
    }

    /// Caller-driven aborts, never swallowed
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::NotFound,
            DbError::UniqueViolation { .. } => Self::DuplicateEmail,
            DbError::Sqlx(e) => Self::Store(format!("database: {e}")),
        }
    }
}

impl From<KvError> for AuthError {
    fn from(err: KvError) -> Self {
        Self::Store(format!("key-value store: {err}"))
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Crypto(err.to_string())
    }
}
