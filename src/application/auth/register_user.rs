use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};
use crate::infrastructure::metrics::ServiceMetrics;

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub name: String,
  pub email: String,
  pub password: String,
}

/// Response after successful registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  /// The created user; carries no password material
  pub user: User,
  /// Session token for the fresh session
  pub token: String,
}

/// Use case for registering a user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
  metrics: ServiceMetrics,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>, metrics: ServiceMetrics) -> Self {
    Self {
      auth_service,
      metrics,
    }
  }

  /// Registers the user and opens their first session.
  ///
  /// # Errors
  /// `AuthError::EmailAlreadyExists` on a duplicate email; value-object
  /// errors on a malformed email or empty password.
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<RegisterUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    match self.auth_service.register(command.name, email, password).await {
      Ok((user, token)) => {
        self.metrics.record_auth_success();
        Ok(RegisterUserResponse { user, token })
      }
      Err(e) => {
        self.metrics.record_auth_failure();
        Err(e)
      }
    }
  }
}
