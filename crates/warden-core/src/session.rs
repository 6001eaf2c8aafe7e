//! Session management
//!
//! Sessions are opaque random tokens stored in the session backend with a
//! TTL. The token carries no data of its own; expiry is enforced entirely by
//! the backend.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use tracing::{debug, instrument};
use warden_kv::SessionStore;
use warden_types::{Session, SessionId, UserId};

use crate::{context::CallContext, error::AuthError};

/// Random bytes per token
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Generate a fresh URL-safe token from the OS CSPRNG.
pub fn generate_session_token() -> SessionId {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    SessionId::new(URL_SAFE_NO_PAD.encode(bytes))
}

pub struct SessionManager<S: SessionStore> {
    store: Arc<S>,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Issue a session for `user_id` that expires after `ttl`.
    #[instrument(skip_all, fields(user_id = %user_id, ttl_secs = ttl.as_secs()))]
    pub async fn create_session(
        &self,
        ctx: &CallContext,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<SessionId, AuthError> {
        if ttl.is_zero() {
            return Err(AuthError::Validation(
                "session ttl must be positive".to_string(),
            ));
        }

        let session = Session::new(generate_session_token(), user_id);
        let token = ctx.run(self.store.create(&session, ttl)).await?;

        debug!(session = ?token, ttl_secs = ttl.as_secs(), "session created");
        Ok(token)
    }

    /// Resolve a live token to its owner.
    ///
    /// Unknown, expired and revoked tokens are all `NotFound`.
    #[instrument(skip_all)]
    pub async fn resolve(&self, ctx: &CallContext, token: &SessionId) -> Result<UserId, AuthError> {
        if token.is_empty() {
            return Err(AuthError::NotFound);
        }

        ctx.run(self.store.get(token))
            .await?
            .map(|session| session.user_id)
            .ok_or(AuthError::NotFound)
    }

    /// Revoke a token. Revoking an unknown token succeeds.
    #[instrument(skip_all)]
    pub async fn revoke(&self, ctx: &CallContext, token: &SessionId) -> Result<(), AuthError> {
        if token.is_empty() {
            return Ok(());
        }

        ctx.run(self.store.delete(token)).await?;
        debug!(session = ?token, "session revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_session_token();
        // 32 bytes, unpadded base64
        assert_eq!(token.as_str().len(), 43);
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: std::collections::HashSet<_> = (0..256)
            .map(|_| generate_session_token().into_inner())
            .collect();
        assert_eq!(tokens.len(), 256);
    }
}
