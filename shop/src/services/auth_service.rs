// shop/src/services/auth_service.rs

//! Password hashing and the account rules applied at registration.

use crate::errors::AppError;
use argon2::{
  password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use rand_core::OsRng;
use tracing::{debug, error, instrument};

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Hashes a plain-text password with Argon2 and a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(hash) => {
      debug!("Password hashed successfully.");
      Ok(hash.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing failed: {argon_err}")))
    }
  }
}

/// Checks `provided_password` against a stored PHC hash string.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash is unusable.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
pub fn verify_password(stored_hash: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
    error!(error = %parse_err, "Stored password hash is malformed.");
    AppError::Internal(format!("Invalid stored password hash: {parse_err}"))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other) => {
      error!(error = %other, "Argon2 verification failed unexpectedly.");
      Err(AppError::Internal(format!("Password verification failed: {other}")))
    }
  }
}

/// Usernames: 1-150 characters drawn from letters, digits and `@ . + - _`.
pub fn validate_username(username: &str) -> Result<(), AppError> {
  if username.is_empty() {
    return Err(AppError::Validation("A username is required.".to_string()));
  }
  if username.chars().count() > USERNAME_MAX_LEN {
    return Err(AppError::Validation(format!(
      "Username must be {USERNAME_MAX_LEN} characters or fewer."
    )));
  }
  let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
  if !username.chars().all(allowed) {
    return Err(AppError::Validation(
      "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters.".to_string(),
    ));
  }
  Ok(())
}

/// Both password fields must match and the password must pass the strength rules.
pub fn validate_new_password(username: &str, password1: &str, password2: &str) -> Result<(), AppError> {
  if password1.is_empty() || password2.is_empty() {
    return Err(AppError::Validation("Both password fields are required.".to_string()));
  }
  if password1 != password2 {
    return Err(AppError::Validation("The two password fields didn't match.".to_string()));
  }
  if password1.chars().count() < PASSWORD_MIN_LEN {
    return Err(AppError::Validation(format!(
      "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
    )));
  }
  if password1.chars().all(|c| c.is_ascii_digit()) {
    return Err(AppError::Validation("This password is entirely numeric.".to_string()));
  }
  let lowered = password1.to_lowercase();
  if !username.is_empty() && lowered.contains(&username.to_lowercase()) {
    return Err(AppError::Validation("The password is too similar to the username.".to_string()));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("correct horse").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "correct horse").unwrap());
    assert!(!verify_password(&hash, "wrong horse").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
  }

  #[test]
  fn malformed_stored_hash_is_internal_error() {
    assert!(matches!(verify_password("not-a-hash", "pw"), Err(AppError::Internal(_))));
  }

  #[test]
  fn username_rules() {
    assert!(validate_username("ada.lovelace+shop@example_1").is_ok());
    assert!(validate_username("").is_err());
    assert!(validate_username("has space").is_err());
    assert!(validate_username("semi;colon").is_err());
    assert!(validate_username(&"a".repeat(150)).is_ok());
    assert!(validate_username(&"a".repeat(151)).is_err());
  }

  #[test]
  fn password_rules() {
    assert!(validate_new_password("ada", "plug-in-42", "plug-in-42").is_ok());

    let mismatch = validate_new_password("ada", "plug-in-42", "plug-in-43").unwrap_err();
    assert!(mismatch.to_string().contains("didn't match"));

    assert!(validate_new_password("ada", "short1", "short1").is_err());
    assert!(validate_new_password("ada", "1234567890", "1234567890").is_err());
    assert!(validate_new_password("gracehopper", "GraceHopper99", "GraceHopper99").is_err());
    assert!(validate_new_password("ada", "", "").is_err());
  }
}
