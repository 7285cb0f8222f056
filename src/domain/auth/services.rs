use std::sync::Arc;

use super::entities::{Identity, IdentityClaims, Role, RoleBinding, Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, TokenCodec, UserRepository};
use super::value_objects::{Email, Password, TokenSignature};

/// Credential and session manager.
///
/// Translates presented bearer tokens into verified identities and manages
/// the create/destroy lifecycle of sessions. Sessions are revocation-only:
/// a token stays valid exactly as long as its signature row exists.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_codec: Arc<dyn TokenCodec>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_codec: Arc<dyn TokenCodec>,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      token_codec,
    }
  }

  /// Registers a new user and opens a session for them.
  ///
  /// Every registration gets the default diner role. The returned user
  /// never carries usable credentials and the password is hashed before it
  /// reaches the repository.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if the email is taken.
  pub async fn register(
    &self,
    name: String,
    email: Email,
    password: Password,
  ) -> Result<(User, String), AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      name,
      email.into_inner(),
      password_hash.into_inner(),
      vec![RoleBinding::new(Role::Diner)],
    );

    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    let token = self.open_session(&created_user).await?;
    Ok((created_user, token))
  }

  /// Authenticates a user and opens a new session.
  ///
  /// An unknown email and a wrong password are indistinguishable to the
  /// caller: both fail with `AuthError::InvalidCredentials`.
  pub async fn login(&self, email: Email, password: Password) -> Result<(User, String), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = super::value_objects::PasswordHash::from_hash(&user.password_hash)?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      return Err(AuthError::InvalidCredentials);
    }

    let token = self.open_session(&user).await?;
    Ok((user, token))
  }

  /// Revokes the session behind the given token.
  ///
  /// Idempotent at this layer: a token whose signature has no active
  /// session row (including malformed tokens) is a no-op, not an error.
  /// Routes still require the caller to resolve to an identity first.
  pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
    let signature = TokenSignature::of(token);
    if signature.is_empty() {
      return Ok(());
    }
    self.session_repo.delete(&signature).await
  }

  /// Resolves a presented bearer token to a verified identity.
  ///
  /// - No token → `Ok(None)` (anonymous).
  /// - Malformed token, revoked session, or failed signature verification
  ///   → `Ok(None)`; crypto errors are never propagated to the caller.
  /// - Active session with a valid signature → the decoded identity.
  ///
  /// Store failures still surface as `Err`.
  pub async fn resolve_identity(&self, token: Option<&str>) -> Result<Option<Identity>, AuthError> {
    let Some(token) = token else {
      return Ok(None);
    };

    let signature = TokenSignature::of(token);
    if signature.is_empty() {
      return Ok(None);
    }

    if !self.session_repo.exists(&signature).await? {
      return Ok(None);
    }

    match self.token_codec.decode(token) {
      Ok(claims) => Ok(Some(Identity::from_claims(claims))),
      Err(e) => {
        tracing::warn!("Rejected token with active session but bad signature: {}", e);
        Ok(None)
      }
    }
  }

  /// Updates a user's email and/or password.
  ///
  /// # Errors
  /// Returns `ValidationError::NoUpdateFields` when both fields are absent,
  /// regardless of whether the user exists.
  pub async fn update_credentials(
    &self,
    user_id: uuid::Uuid,
    email: Option<Email>,
    password: Option<Password>,
  ) -> Result<User, AuthError> {
    if email.is_none() && password.is_none() {
      return Err(super::errors::ValidationError::NoUpdateFields.into());
    }

    let password_hash = match password {
      Some(password) => Some(self.password_hasher.hash(&password).await?),
      None => None,
    };

    self
      .user_repo
      .update_credentials(user_id, email.as_ref(), password_hash.as_ref())
      .await
  }

  async fn open_session(&self, user: &User) -> Result<String, AuthError> {
    let claims = IdentityClaims::from(user);
    let token = self.token_codec.mint(&claims)?;

    let signature = TokenSignature::of(&token);
    self
      .session_repo
      .create(Session::new(signature, user.id))
      .await?;

    Ok(token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::security::{Argon2PasswordHasher, JwtTokenCodec};
  use async_trait::async_trait;
  use std::collections::{HashMap, HashSet};
  use std::sync::Mutex;
  use uuid::Uuid;

  #[derive(Default)]
  struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
  }

  #[async_trait]
  impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
      let mut users = self.users.lock().unwrap();
      if users.values().any(|u| u.email == user.email) {
        return Err(AuthError::Repository(RepositoryError::DuplicateKey(
          user.email.clone(),
        )));
      }
      users.insert(user.id, user.clone());
      Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
      Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
      Ok(
        self
          .users
          .lock()
          .unwrap()
          .values()
          .find(|u| u.email == email.as_str())
          .cloned(),
      )
    }

    async fn update_credentials(
      &self,
      id: Uuid,
      email: Option<&Email>,
      password_hash: Option<&super::super::value_objects::PasswordHash>,
    ) -> Result<User, AuthError> {
      let mut users = self.users.lock().unwrap();
      let user = users.get_mut(&id).ok_or(AuthError::UserNotFound)?;
      if let Some(email) = email {
        user.email = email.as_str().to_string();
      }
      if let Some(hash) = password_hash {
        user.password_hash = hash.as_str().to_string();
      }
      Ok(user.clone())
    }
  }

  #[derive(Default)]
  struct InMemorySessionRepository {
    signatures: Mutex<HashSet<String>>,
  }

  #[async_trait]
  impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<(), AuthError> {
      self
        .signatures
        .lock()
        .unwrap()
        .insert(session.signature.into_inner());
      Ok(())
    }

    async fn exists(&self, signature: &TokenSignature) -> Result<bool, AuthError> {
      Ok(self.signatures.lock().unwrap().contains(signature.as_str()))
    }

    async fn delete(&self, signature: &TokenSignature) -> Result<(), AuthError> {
      self.signatures.lock().unwrap().remove(signature.as_str());
      Ok(())
    }
  }

  fn service() -> AuthService {
    service_with_secret("test-signing-secret")
  }

  fn service_with_secret(secret: &str) -> AuthService {
    AuthService::new(
      Arc::new(InMemoryUserRepository::default()),
      Arc::new(InMemorySessionRepository::default()),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      Arc::new(JwtTokenCodec::new(secret)),
    )
  }

  async fn register_jane(service: &AuthService) -> (User, String) {
    service
      .register(
        "Jane".into(),
        Email::new("jane@x.com").unwrap(),
        Password::new("p").unwrap(),
      )
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_register_issues_three_segment_token_and_diner_role() {
    let service = service();
    let (user, token) = register_jane(&service).await;

    assert_eq!(token.split('.').count(), 3);
    assert_eq!(user.roles, vec![RoleBinding::new(Role::Diner)]);
    assert_eq!(user.email, "jane@x.com");
  }

  #[tokio::test]
  async fn test_register_duplicate_email_conflicts() {
    let service = service();
    register_jane(&service).await;

    let result = service
      .register(
        "Jane Again".into(),
        Email::new("jane@x.com").unwrap(),
        Password::new("q").unwrap(),
      )
      .await;
    assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
  }

  #[tokio::test]
  async fn test_login_resolves_to_matching_identity() {
    let service = service();
    let (user, _) = register_jane(&service).await;

    let (logged_in, token) = service
      .login(
        Email::new("jane@x.com").unwrap(),
        Password::new("p").unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(logged_in.id, user.id);

    let identity = service.resolve_identity(Some(&token)).await.unwrap();
    assert_eq!(identity.unwrap().user_id, user.id);
  }

  #[tokio::test]
  async fn test_login_wrong_password_and_unknown_email_look_identical() {
    let service = service();
    register_jane(&service).await;

    let wrong_password = service
      .login(
        Email::new("jane@x.com").unwrap(),
        Password::new("nope").unwrap(),
      )
      .await;
    let unknown_email = service
      .login(
        Email::new("ghost@x.com").unwrap(),
        Password::new("p").unwrap(),
      )
      .await;

    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
  }

  #[tokio::test]
  async fn test_logout_revokes_exactly_that_session() {
    let service = service();
    let (_, token) = register_jane(&service).await;

    assert!(service.resolve_identity(Some(&token)).await.unwrap().is_some());

    service.logout(&token).await.unwrap();
    assert!(service.resolve_identity(Some(&token)).await.unwrap().is_none());

    // Logging out again is a no-op, not an error
    service.logout(&token).await.unwrap();
  }

  #[tokio::test]
  async fn test_login_logout_round_trip_leaves_no_stale_sessions() {
    let service = service();
    register_jane(&service).await;

    let mut revoked = Vec::new();
    for _ in 0..3 {
      let (_, token) = service
        .login(
          Email::new("jane@x.com").unwrap(),
          Password::new("p").unwrap(),
        )
        .await
        .unwrap();
      service.logout(&token).await.unwrap();
      revoked.push(token);
    }

    for token in revoked {
      assert!(service.resolve_identity(Some(&token)).await.unwrap().is_none());
    }
  }

  #[tokio::test]
  async fn test_anonymous_and_malformed_tokens_resolve_to_none() {
    let service = service();
    register_jane(&service).await;

    assert!(service.resolve_identity(None).await.unwrap().is_none());
    assert!(service.resolve_identity(Some("test")).await.unwrap().is_none());
    assert!(service.resolve_identity(Some("a.b")).await.unwrap().is_none());
    assert!(
      service
        .resolve_identity(Some("never.stored.signature"))
        .await
        .unwrap()
        .is_none()
    );
  }

  #[tokio::test]
  async fn test_token_signed_with_other_secret_is_rejected() {
    let service = service();
    let (user, token) = register_jane(&service).await;

    // Forge a token with the same claims but a different secret, then make
    // its signature segment match a stored session.
    let forged = JwtTokenCodec::new("other-secret")
      .mint(&IdentityClaims {
        sub: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        roles: user.roles.clone(),
        iat: 0,
      })
      .unwrap();

    assert!(service.resolve_identity(Some(&forged)).await.unwrap().is_none());
    // The genuine token still resolves
    assert!(service.resolve_identity(Some(&token)).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_update_credentials_rejects_empty_update() {
    let service = service();
    let (user, _) = register_jane(&service).await;

    let existing = service.update_credentials(user.id, None, None).await;
    assert!(matches!(
      existing,
      Err(AuthError::Validation(
        super::super::errors::ValidationError::NoUpdateFields
      ))
    ));

    // Same failure for a user id that does not exist
    let missing = service.update_credentials(Uuid::new_v4(), None, None).await;
    assert!(matches!(missing, Err(AuthError::Validation(_))));
  }

  #[tokio::test]
  async fn test_update_credentials_changes_login() {
    let service = service();
    let (user, _) = register_jane(&service).await;

    service
      .update_credentials(
        user.id,
        Some(Email::new("jane@new.com").unwrap()),
        Some(Password::new("fresh").unwrap()),
      )
      .await
      .unwrap();

    let result = service
      .login(
        Email::new("jane@new.com").unwrap(),
        Password::new("fresh").unwrap(),
      )
      .await;
    assert!(result.is_ok());

    let stale = service
      .login(
        Email::new("jane@x.com").unwrap(),
        Password::new("p").unwrap(),
      )
      .await;
    assert!(matches!(stale, Err(AuthError::InvalidCredentials)));
  }
}
