use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::services::FranchiseService;

/// Use case for deleting a franchise (admin only; cascades to stores)
pub struct DeleteFranchiseUseCase {
  franchise_service: Arc<FranchiseService>,
}

impl DeleteFranchiseUseCase {
  pub fn new(franchise_service: Arc<FranchiseService>) -> Self {
    Self { franchise_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    franchise_id: Uuid,
  ) -> Result<(), FranchiseError> {
    self
      .franchise_service
      .delete_franchise(identity, franchise_id)
      .await
  }
}
