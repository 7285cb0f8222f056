use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};
use crate::infrastructure::metrics::ServiceMetrics;

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user: User,
  pub token: String,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
  metrics: ServiceMetrics,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>, metrics: ServiceMetrics) -> Self {
    Self {
      auth_service,
      metrics,
    }
  }

  /// Authenticates and opens a session.
  ///
  /// # Errors
  /// `AuthError::InvalidCredentials` for an unknown email or a wrong
  /// password; the two are indistinguishable by design.
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    match self.auth_service.login(email, password).await {
      Ok((user, token)) => {
        self.metrics.record_auth_success();
        Ok(LoginUserResponse { user, token })
      }
      Err(e) => {
        self.metrics.record_auth_failure();
        Err(e)
      }
    }
  }
}
