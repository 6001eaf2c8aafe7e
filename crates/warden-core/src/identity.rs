//! Identity orchestration - registration, authentication and user lookups
//!
//! Lookups by id go through the user cache first and fall back to the
//! durable store on a miss, refilling the cache afterwards. The cache is an
//! optimisation only: read or write faults there are logged and never fail
//! the call.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use warden_db::UserRepository;
use warden_kv::UserCache;
use warden_types::{NewUser, User, UserId};

use crate::{
    context::CallContext,
    credential::{normalize_email, prepare_for_registration, verify_password},
    error::AuthError,
    validation::{validate_email, validate_new_user},
};

pub struct IdentityService<U: UserRepository, C: UserCache> {
    users: Arc<U>,
    cache: Arc<C>,
    cache_ttl: Duration,
}

impl<U: UserRepository, C: UserCache> IdentityService<U, C> {
    pub fn new(users: Arc<U>, cache: Arc<C>, cache_ttl: Duration) -> Self {
        Self {
            users,
            cache,
            cache_ttl,
        }
    }

    /// Validate, hash and persist a new account.
    ///
    /// The returned record is sanitized.
    #[instrument(skip_all)]
    pub async fn register(&self, ctx: &CallContext, candidate: NewUser) -> Result<User, AuthError> {
        validate_new_user(&candidate)?;

        let email = normalize_email(&candidate.email);
        if ctx.run(self.users.find_by_email(&email)).await?.is_some() {
            debug!("registration rejected, email taken");
            return Err(AuthError::DuplicateEmail);
        }

        ctx.check()?;
        let create = blocking(move || prepare_for_registration(candidate)).await?;

        // A concurrent registration can still win the race; the unique
        // constraint surfaces it as DuplicateEmail.
        let row = ctx.run(self.users.create(create)).await?;
        let user = User::from(row).sanitized();

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check an email/password pair.
    ///
    /// Unknown accounts and wrong passwords both yield `InvalidCredentials`.
    #[instrument(skip_all)]
    pub async fn authenticate(
        &self,
        ctx: &CallContext,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        validate_email(email)?;
        let email = normalize_email(email);

        let Some(row) = ctx.run(self.users.find_by_email(&email)).await? else {
            debug!("authentication for unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        ctx.check()?;
        let stored_hash = row.password.clone();
        let candidate = password.trim().to_string();
        let matches = blocking(move || verify_password(&stored_hash, &candidate)).await?;
        if !matches {
            debug!(user_id = %row.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(User::from(row).sanitized())
    }

    /// Cache-aside lookup by id.
    #[instrument(skip_all, fields(user_id = %id))]
    pub async fn lookup_by_id(&self, ctx: &CallContext, id: UserId) -> Result<User, AuthError> {
        match ctx.run(self.cache.get(id)).await {
            Ok(Some(user)) => {
                debug!("user cache hit");
                return Ok(user.sanitized());
            }
            Ok(None) => debug!("user cache miss"),
            Err(e) if e.is_cancellation() => return Err(e),
            Err(e) => warn!(error = %e, "user cache read failed, falling back to store"),
        }

        let row = ctx
            .run(self.users.find_by_id(id.0))
            .await?
            .ok_or(AuthError::NotFound)?;
        let user = User::from(row).sanitized();

        self.refill_cache(ctx, &user).await;
        Ok(user)
    }

    /// Store-only lookup by email; the cache is keyed by id and not consulted.
    #[instrument(skip_all)]
    pub async fn lookup_by_email(&self, ctx: &CallContext, email: &str) -> Result<User, AuthError> {
        validate_email(email)?;
        let email = normalize_email(email);

        let row = ctx
            .run(self.users.find_by_email(&email))
            .await?
            .ok_or(AuthError::NotFound)?;
        Ok(User::from(row).sanitized())
    }

    /// Drop a cached record so the next lookup reads the store.
    #[instrument(skip_all, fields(user_id = %id))]
    pub async fn evict(&self, ctx: &CallContext, id: UserId) -> Result<(), AuthError> {
        ctx.run(self.cache.delete(id)).await
    }

    /// The store read already succeeded, so no refill outcome fails the lookup.
    async fn refill_cache(&self, ctx: &CallContext, user: &User) {
        match ctx.run(self.cache.set(user.id, user, self.cache_ttl)).await {
            Ok(()) => {}
            Err(e) if e.is_cancellation() => {
                debug!(user_id = %user.id, error = %e, "user cache refill abandoned");
            }
            Err(e) => warn!(user_id = %user.id, error = %e, "user cache refill failed"),
        }
    }
}

/// Run CPU-bound hashing off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Crypto(format!("hashing task failed: {e}")))?
}
