use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Franchise, NewFranchise, Store};
use super::errors::FranchiseError;

/// Repository trait for franchise and store persistence
#[async_trait]
pub trait FranchiseRepository: Send + Sync {
  /// Creates a franchise and links its admins in one atomic unit.
  ///
  /// Every admin email must resolve to an existing user; otherwise the
  /// whole create fails with `UnknownAdminEmail` and no rows are written.
  async fn create(&self, franchise: NewFranchise) -> Result<Franchise, FranchiseError>;

  /// Finds a franchise with admins and stores hydrated
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Franchise>, FranchiseError>;

  /// Lists all franchises with admins and stores hydrated
  async fn list_all(&self) -> Result<Vec<Franchise>, FranchiseError>;

  /// Lists franchises where the user appears in the admin list;
  /// empty when none.
  async fn list_for_admin(&self, user_id: Uuid) -> Result<Vec<Franchise>, FranchiseError>;

  /// Deletes a franchise, cascading to its stores.
  /// Fails with `NotFound` when the franchise does not exist.
  async fn delete(&self, id: Uuid) -> Result<(), FranchiseError>;

  /// Creates a store under the given franchise
  async fn create_store(&self, franchise_id: Uuid, name: String) -> Result<Store, FranchiseError>;

  /// Deletes a store scoped to its franchise. Fails with `StoreNotFound`
  /// when the store does not exist under that franchise.
  async fn delete_store(&self, franchise_id: Uuid, store_id: Uuid) -> Result<(), FranchiseError>;
}
