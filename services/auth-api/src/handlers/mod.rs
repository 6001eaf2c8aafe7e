//! HTTP handlers for the Auth API

pub mod health;

pub use health::{health, ready};
