use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::franchise::entities::Store;
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::services::FranchiseService;

/// Command for creating a store under a franchise
#[derive(Debug, Clone)]
pub struct CreateStoreCommand {
  pub franchise_id: Uuid,
  pub name: String,
}

/// Use case for creating a store (admin or listed franchise admin)
pub struct CreateStoreUseCase {
  franchise_service: Arc<FranchiseService>,
}

impl CreateStoreUseCase {
  pub fn new(franchise_service: Arc<FranchiseService>) -> Self {
    Self { franchise_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    command: CreateStoreCommand,
  ) -> Result<Store, FranchiseError> {
    self
      .franchise_service
      .create_store(identity, command.franchise_id, command.name)
      .await
  }
}
