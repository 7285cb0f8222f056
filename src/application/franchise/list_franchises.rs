use std::sync::Arc;

use crate::domain::auth::entities::Identity;
use crate::domain::franchise::entities::FranchiseView;
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::franchise::services::FranchiseService;

/// Use case for listing franchises.
///
/// Admin requesters get full admin detail; everyone else the redacted
/// store-only view. Open to anonymous callers.
pub struct ListFranchisesUseCase {
  franchise_service: Arc<FranchiseService>,
}

impl ListFranchisesUseCase {
  pub fn new(franchise_service: Arc<FranchiseService>) -> Self {
    Self { franchise_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
  ) -> Result<Vec<FranchiseView>, FranchiseError> {
    self.franchise_service.list_franchises(identity).await
  }
}
