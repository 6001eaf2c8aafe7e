//! Auth service - ties together identity lookups and session management

use std::sync::Arc;
use std::time::Duration;

use warden_db::UserRepository;
use warden_kv::{SessionStore, UserCache};
use warden_types::{NewUser, SessionId, User, UserId};

use crate::{
    config::AuthConfig, context::CallContext, identity::IdentityService,
    session::SessionManager, AuthError,
};

/// Authentication service
///
/// Provides a single entry point for:
/// - Registration and credential checks
/// - Cache-aside user lookups
/// - Session issue, resolution and revocation
pub struct AuthService<U: UserRepository, C: UserCache, S: SessionStore> {
    config: AuthConfig,
    identity: IdentityService<U, C>,
    sessions: SessionManager<S>,
}

impl<U: UserRepository, C: UserCache, S: SessionStore> AuthService<U, C, S> {
    pub fn new(config: AuthConfig, users: Arc<U>, cache: Arc<C>, sessions: Arc<S>) -> Self {
        Self {
            identity: IdentityService::new(users, cache, config.user_cache_ttl),
            sessions: SessionManager::new(sessions),
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Session lifetime applied at login
    pub fn default_session_ttl(&self) -> Duration {
        self.config.session_ttl
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub async fn register(&self, ctx: &CallContext, candidate: NewUser) -> Result<User, AuthError> {
        self.identity.register(ctx, candidate).await
    }

    pub async fn authenticate(
        &self,
        ctx: &CallContext,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        self.identity.authenticate(ctx, email, password).await
    }

    pub async fn lookup_by_id(&self, ctx: &CallContext, id: UserId) -> Result<User, AuthError> {
        self.identity.lookup_by_id(ctx, id).await
    }

    pub async fn lookup_by_email(&self, ctx: &CallContext, email: &str) -> Result<User, AuthError> {
        self.identity.lookup_by_email(ctx, email).await
    }

    pub async fn evict_cached_user(&self, ctx: &CallContext, id: UserId) -> Result<(), AuthError> {
        self.identity.evict(ctx, id).await
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    pub async fn create_session(
        &self,
        ctx: &CallContext,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<SessionId, AuthError> {
        self.sessions.create_session(ctx, user_id, ttl).await
    }

    pub async fn resolve_session(
        &self,
        ctx: &CallContext,
        token: &SessionId,
    ) -> Result<UserId, AuthError> {
        self.sessions.resolve(ctx, token).await
    }

    pub async fn revoke_session(&self, ctx: &CallContext, token: &SessionId) -> Result<(), AuthError> {
        self.sessions.revoke(ctx, token).await
    }
}
