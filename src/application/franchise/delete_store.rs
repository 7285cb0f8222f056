use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::services::FranchiseService;

/// Use case for deleting a store (admin or listed franchise admin)
pub struct DeleteStoreUseCase {
  franchise_service: Arc<FranchiseService>,
}

impl DeleteStoreUseCase {
  pub fn new(franchise_service: Arc<FranchiseService>) -> Self {
    Self { franchise_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    franchise_id: Uuid,
    store_id: Uuid,
  ) -> Result<(), FranchiseError> {
    self
      .franchise_service
      .delete_store(identity, franchise_id, store_id)
      .await
  }
}
