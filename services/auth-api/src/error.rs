//! Error mapping for the Auth API service.
//!
//! Every orchestrator failure crosses into a gRPC status exactly once, here.

use tonic::{Code, Status};
use warden_core::AuthError;

/// Caller-facing message for faults whose detail stays server-side
pub const INTERNAL_MESSAGE: &str = "internal error";

/// API error type
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AuthError);

impl ApiError {
    pub fn code(&self) -> Code {
        match &self.0 {
            AuthError::NotFound => Code::NotFound,
            AuthError::DuplicateEmail => Code::AlreadyExists,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => Code::Unauthenticated,
            AuthError::InvalidEmail | AuthError::Validation(_) => Code::InvalidArgument,
            AuthError::Cancelled => Code::Cancelled,
            AuthError::DeadlineExceeded => Code::DeadlineExceeded,
            AuthError::Store(_) | AuthError::Crypto(_) => Code::Internal,
        }
    }

    fn message(&self) -> String {
        if self.0.is_internal() {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.to_string()
        }
    }
}

impl From<ApiError> for Status {
    fn from(err: ApiError) -> Self {
        Status::new(err.code(), err.message())
    }
}
