use thiserror::Error;

use crate::domain::auth::errors::{AuthError, RepositoryError};

#[derive(Debug, Error)]
pub enum FranchiseError {
  #[error("Franchise not found")]
  NotFound,

  #[error("Store not found")]
  StoreNotFound,

  #[error("A franchise with this name already exists")]
  NameAlreadyExists,

  #[error("Unknown admin email: {0}")]
  UnknownAdminEmail(String),

  #[error("Auth error: {0}")]
  Auth(#[from] AuthError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for FranchiseError {
  fn from(error: sqlx::Error) -> Self {
    FranchiseError::Repository(RepositoryError::from(error))
  }
}
