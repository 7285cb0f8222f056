use std::sync::Arc;

use crate::domain::auth::entities::Identity;
use crate::domain::franchise::entities::{Franchise, NewFranchise};
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::services::FranchiseService;

/// Command for creating a franchise
#[derive(Debug, Clone)]
pub struct CreateFranchiseCommand {
  pub name: String,
  /// Admin emails; each must already belong to a known user
  pub admin_emails: Vec<String>,
}

/// Use case for creating a franchise (admin only)
pub struct CreateFranchiseUseCase {
  franchise_service: Arc<FranchiseService>,
}

impl CreateFranchiseUseCase {
  pub fn new(franchise_service: Arc<FranchiseService>) -> Self {
    Self { franchise_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    command: CreateFranchiseCommand,
  ) -> Result<Franchise, FranchiseError> {
    self
      .franchise_service
      .create_franchise(
        identity,
        NewFranchise {
          name: command.name,
          admin_emails: command.admin_emails,
        },
      )
      .await
  }
}
