//! Credential handling
//!
//! Argon2id hashing with a per-record random salt encoded in the PHC string,
//! plus the normalization applied to a registration candidate before it is
//! persisted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use warden_db::CreateUser;
use warden_types::{NewUser, User};

use crate::error::AuthError;

/// Hash a plaintext password into a self-describing PHC string.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored hash.
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(stored_hash: &str, plain: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

/// Normalize a validated candidate and replace its password with the hash.
pub fn prepare_for_registration(candidate: NewUser) -> Result<CreateUser, AuthError> {
    let password_hash = hash_password(candidate.password.trim())?;
    Ok(CreateUser {
        email: normalize_email(&candidate.email),
        first_name: candidate.first_name.trim().to_string(),
        last_name: candidate.last_name.trim().to_string(),
        role: normalize_role(&candidate.role),
        avatar: candidate
            .avatar
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
        password_hash,
    })
}

/// Strip the password hash from a record leaving the service.
pub fn sanitize(user: User) -> User {
    user.sanitized()
}
