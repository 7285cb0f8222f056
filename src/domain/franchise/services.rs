use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::{Identity, Role};
use crate::domain::auth::policy;

use super::entities::{Franchise, FranchiseView, NewFranchise, Store};
use super::errors::FranchiseError;
use super::ports::FranchiseRepository;

/// Franchise and store management.
///
/// Every public operation authorizes against the resolved identity before
/// touching the repository.
pub struct FranchiseService {
  franchise_repo: Arc<dyn FranchiseRepository>,
}

impl FranchiseService {
  pub fn new(franchise_repo: Arc<dyn FranchiseRepository>) -> Self {
    Self { franchise_repo }
  }

  /// Creates a franchise. Requires the admin role.
  pub async fn create_franchise(
    &self,
    identity: Option<&Identity>,
    franchise: NewFranchise,
  ) -> Result<Franchise, FranchiseError> {
    let identity = policy::require_identity(identity)?;
    policy::require_admin(identity)?;

    self.franchise_repo.create(franchise).await
  }

  /// Deletes a franchise and its stores. Requires the admin role.
  pub async fn delete_franchise(
    &self,
    identity: Option<&Identity>,
    franchise_id: Uuid,
  ) -> Result<(), FranchiseError> {
    let identity = policy::require_identity(identity)?;
    policy::require_admin(identity)?;

    self.franchise_repo.delete(franchise_id).await
  }

  /// Lists all franchises.
  ///
  /// Requesters with admin authority see full admin detail; everyone else,
  /// anonymous callers included, gets the redacted store-only view.
  pub async fn list_franchises(
    &self,
    identity: Option<&Identity>,
  ) -> Result<Vec<FranchiseView>, FranchiseError> {
    let franchises = self.franchise_repo.list_all().await?;

    let is_admin = identity
      .map(|identity| policy::has_role(&identity.roles, Role::Admin, None))
      .unwrap_or(false);

    let view: fn(Franchise) -> FranchiseView = if is_admin {
      FranchiseView::unredacted
    } else {
      FranchiseView::redacted
    };

    Ok(franchises.into_iter().map(view).collect())
  }

  /// Lists the franchises a user administers.
  ///
  /// Requires an identity. Asking about another user yields an empty list
  /// unless the requester is an admin.
  pub async fn list_user_franchises(
    &self,
    identity: Option<&Identity>,
    user_id: Uuid,
  ) -> Result<Vec<Franchise>, FranchiseError> {
    let identity = policy::require_identity(identity)?;

    if identity.user_id != user_id && !policy::has_role(&identity.roles, Role::Admin, None) {
      return Ok(Vec::new());
    }

    self.franchise_repo.list_for_admin(user_id).await
  }

  /// Creates a store under a franchise. Requires the admin role or
  /// membership in that franchise's admin list.
  pub async fn create_store(
    &self,
    identity: Option<&Identity>,
    franchise_id: Uuid,
    name: String,
  ) -> Result<Store, FranchiseError> {
    let identity = policy::require_identity(identity)?;

    let franchise = self
      .franchise_repo
      .find_by_id(franchise_id)
      .await?
      .ok_or(FranchiseError::NotFound)?;

    policy::require_store_authority(identity, &franchise)?;

    self.franchise_repo.create_store(franchise_id, name).await
  }

  /// Deletes a store, scoped to its franchise. Same authority rule as
  /// store creation.
  pub async fn delete_store(
    &self,
    identity: Option<&Identity>,
    franchise_id: Uuid,
    store_id: Uuid,
  ) -> Result<(), FranchiseError> {
    let identity = policy::require_identity(identity)?;

    let franchise = self
      .franchise_repo
      .find_by_id(franchise_id)
      .await?
      .ok_or(FranchiseError::NotFound)?;

    policy::require_store_authority(identity, &franchise)?;

    self.franchise_repo.delete_store(franchise_id, store_id).await
  }
}
