use thiserror::Error;
use uuid::Uuid;

use crate::domain::auth::errors::{AuthError, RepositoryError};

#[derive(Debug, Error)]
pub enum OrderError {
  #[error("Menu item not found: {0}")]
  MenuItemNotFound(Uuid),

  #[error("Order must contain at least one item")]
  NoItems,

  #[error("Order verification failed: {0}")]
  VerificationFailed(String),

  #[error("Auth error: {0}")]
  Auth(#[from] AuthError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderError {
  fn from(error: sqlx::Error) -> Self {
    OrderError::Repository(RepositoryError::from(error))
  }
}
