use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::{Identity, User};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::policy;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for updating a user's credentials
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
  pub user_id: Uuid,
  pub email: Option<String>,
  pub password: Option<String>,
}

/// Use case for updating a user's email and/or password
pub struct UpdateUserUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Updates the target user. Only the user themselves or an admin may do
  /// this; an update with neither field fails validation outright.
  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    command: UpdateUserCommand,
  ) -> Result<User, AuthError> {
    let identity = policy::require_identity(identity)?;
    policy::require_self_or_admin(identity, command.user_id)?;

    let email = command.email.map(Email::new).transpose()?;
    let password = command.password.map(Password::new).transpose()?;

    self
      .auth_service
      .update_credentials(command.user_id, email, password)
      .await
  }
}
