//! Warden Types - Shared domain types
//!
//! This crate contains domain types used across Warden crates:
//! - User identity records and registration candidates
//! - Session grants and opaque session tokens

pub mod session;
pub mod user;

pub use session::*;
pub use user::*;
