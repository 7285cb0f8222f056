use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::franchise::entities::Franchise;
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::services::FranchiseService;

/// Use case for listing the franchises a user administers
pub struct ListUserFranchisesUseCase {
  franchise_service: Arc<FranchiseService>,
}

impl ListUserFranchisesUseCase {
  pub fn new(franchise_service: Arc<FranchiseService>) -> Self {
    Self { franchise_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    user_id: Uuid,
  ) -> Result<Vec<Franchise>, FranchiseError> {
    self
      .franchise_service
      .list_user_franchises(identity, user_id)
      .await
  }
}
