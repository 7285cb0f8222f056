use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for logging out a user
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Revokes the caller's session.
  ///
  /// The route contract requires the token to currently resolve to an
  /// authenticated identity; only then is the session row removed.
  pub async fn execute(&self, token: &str) -> Result<(), AuthError> {
    self
      .auth_service
      .resolve_identity(Some(token))
      .await?
      .ok_or(AuthError::Unauthenticated)?;

    self.auth_service.logout(token).await
  }
}
