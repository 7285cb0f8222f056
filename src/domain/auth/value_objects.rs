use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::Zeroize;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password must not be empty")]
  PasswordEmpty,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValueObjectError::PasswordEmpty);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// Ensure the plaintext is wiped when dropped
impl Drop for Password {
  fn drop(&mut self) {
    self.0.zeroize();
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Debug, Clone)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    // Validate it's a proper Argon2 hash
    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// TokenSignature Value Object (Session Revocation Key)
// ============================================================================

/// The trailing signature segment of a signed three-segment token.
///
/// Sessions are stored keyed by this segment. Any input that does not have
/// exactly three non-empty dot-delimited segments yields the empty
/// signature, which can never match a stored session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSignature(String);

impl TokenSignature {
  /// Extracts the signature segment from a token string.
  pub fn of(token: &str) -> Self {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
      (Some(_), Some(_), Some(signature), None) => Self(signature.to_string()),
      _ => Self(String::new()),
    }
  }

  /// Reconstructs a signature from its stored string form.
  pub fn from_stored(signature: impl Into<String>) -> Self {
    Self(signature.into())
  }

  /// True when the source token was malformed.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns the signature as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenSignature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_validation() {
    assert!(Email::new("test@example.com").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("Jane@Example.COM").unwrap();
    assert_eq!(email.as_str(), "jane@example.com");
  }

  #[test]
  fn test_password_validation() {
    // Single-character passwords are accepted; strength is not this layer's job
    assert!(Password::new("a").is_ok());
    assert!(Password::new("password123").is_ok());

    assert!(matches!(
      Password::new(""),
      Err(ValueObjectError::PasswordEmpty)
    ));

    let long_password = "a".repeat(129);
    assert!(matches!(
      Password::new(long_password),
      Err(ValueObjectError::PasswordTooLong)
    ));
  }

  #[test]
  fn test_password_never_displayed() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{}", password), "***");
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_password_hash_rejects_garbage() {
    assert!(PasswordHash::from_hash("not-a-hash").is_err());
  }

  #[test]
  fn test_token_signature_extraction() {
    let signature = TokenSignature::of("aaa.bbb.ccc");
    assert_eq!(signature.as_str(), "ccc");
    assert!(!signature.is_empty());
  }

  #[test]
  fn test_token_signature_malformed_inputs() {
    assert!(TokenSignature::of("").is_empty());
    assert!(TokenSignature::of("test").is_empty());
    assert!(TokenSignature::of("a.b").is_empty());
    assert!(TokenSignature::of("a.b.c.d").is_empty());
    // Trailing empty segment degrades to the empty signature as well
    assert!(TokenSignature::of("a.b.").is_empty());
  }

  #[test]
  fn test_token_signature_round_trip_through_storage() {
    let signature = TokenSignature::of("h.p.sig");
    let stored = TokenSignature::from_stored(signature.as_str());
    assert_eq!(signature, stored);
  }
}
