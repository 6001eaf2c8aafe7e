//! Input validation for registration and login

use std::sync::LazyLock;

use regex::Regex;
use warden_types::NewUser;

use crate::credential::normalize_role;
use crate::error::AuthError;

pub const EMAIL_MAX_LEN: usize = 60;
pub const NAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 250;
pub const ROLE_MAX_LEN: usize = 10;
pub const AVATAR_MAX_LEN: usize = 512;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Check that `email` is a plausible address after trimming.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let email = email.trim();
    if email.is_empty() || email.chars().count() > EMAIL_MAX_LEN || !EMAIL_RE.is_match(email) {
        return Err(AuthError::InvalidEmail);
    }
    Ok(())
}

/// Check a registration candidate before anything touches a store.
pub fn validate_new_user(candidate: &NewUser) -> Result<(), AuthError> {
    validate_email(&candidate.email)?;
    require_bounded("first_name", &candidate.first_name, NAME_MAX_LEN)?;
    require_bounded("last_name", &candidate.last_name, NAME_MAX_LEN)?;

    let password_len = candidate.password.trim().chars().count();
    if password_len < PASSWORD_MIN_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }
    if password_len > PASSWORD_MAX_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at most {PASSWORD_MAX_LEN} characters"
        )));
    }

    // Lowercasing can lengthen some characters; bound what gets stored
    if normalize_role(&candidate.role).chars().count() > ROLE_MAX_LEN {
        return Err(AuthError::Validation(format!(
            "role must be at most {ROLE_MAX_LEN} characters"
        )));
    }
    if let Some(avatar) = &candidate.avatar {
        if avatar.chars().count() > AVATAR_MAX_LEN {
            return Err(AuthError::Validation(format!(
                "avatar must be at most {AVATAR_MAX_LEN} characters"
            )));
        }
    }
    Ok(())
}

fn require_bounded(field: &str, value: &str, max: usize) -> Result<(), AuthError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    if len > max {
        return Err(AuthError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
