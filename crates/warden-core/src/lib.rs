//! Warden Core - Identity and session orchestration
//!
//! Credential hashing, cache-aside user lookups, opaque session tokens and
//! the error taxonomy surfaced to the request boundary.

pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod identity;
pub mod service;
pub mod session;
pub mod validation;

pub use config::AuthConfig;
pub use context::CallContext;
pub use credential::{
    hash_password, normalize_email, normalize_role, prepare_for_registration, sanitize,
    verify_password,
};
pub use error::AuthError;
pub use identity::IdentityService;
pub use service::AuthService;
pub use session::{generate_session_token, SessionManager};
pub use validation::{validate_email, validate_new_user};
