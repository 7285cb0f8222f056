use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{IdentityClaims, Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, TokenSignature};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user together with its role bindings, atomically.
  /// Fails with `AuthError::EmailAlreadyExists` on a duplicate email.
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user (roles included) by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user (roles included) by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Updates only the provided credential fields. Callers must have
  /// rejected the all-`None` case already; this method never sees it.
  async fn update_credentials(
    &self,
    id: Uuid,
    email: Option<&Email>,
    password_hash: Option<&PasswordHash>,
  ) -> Result<User, AuthError>;
}

/// Repository trait for the active-session table
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Records a session keyed by its token signature
  async fn create(&self, session: Session) -> Result<(), AuthError>;

  /// True when the signature has an active session row
  async fn exists(&self, signature: &TokenSignature) -> Result<bool, AuthError>;

  /// Removes exactly the session row for the signature. Removing a
  /// signature with no active session is not an error.
  async fn delete(&self, signature: &TokenSignature) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Service trait for minting and verifying signed session tokens
pub trait TokenCodec: Send + Sync {
  /// Signs the claims into a three-segment token string
  fn mint(&self, claims: &IdentityClaims) -> Result<String, AuthError>;

  /// Cryptographically verifies the token and returns its claims
  fn decode(&self, token: &str) -> Result<IdentityClaims, AuthError>;
}
