use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{MenuItem, Order, OrderDraft, VerificationReport};
use super::errors::OrderError;
use crate::domain::auth::entities::Identity;

/// Repository trait for the menu
#[async_trait]
pub trait MenuRepository: Send + Sync {
  /// Adds an item to the menu
  async fn add(&self, item: MenuItem) -> Result<MenuItem, OrderError>;

  /// Lists the whole menu
  async fn list(&self) -> Result<Vec<MenuItem>, OrderError>;
}

/// Repository trait for orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
  /// Inserts an order and its item snapshots in one atomic unit.
  ///
  /// Each item's menu id is checked against the menu inside the same
  /// transaction; an unknown id fails the whole insert with
  /// `MenuItemNotFound` and leaves no rows behind.
  async fn create(&self, diner_id: Uuid, draft: OrderDraft) -> Result<Order, OrderError>;

  /// One page of a diner's own orders, insertion-ordered.
  /// Never returns another diner's rows.
  async fn list_for_diner(
    &self,
    diner_id: Uuid,
    page: u32,
    page_size: u32,
  ) -> Result<Vec<Order>, OrderError>;
}

/// External order-verification collaborator.
///
/// Advisory with respect to persistence: the caller forwards an
/// already-committed order and must treat failures as non-fatal.
#[async_trait]
pub trait OrderVerifier: Send + Sync {
  async fn verify(
    &self,
    diner: &Identity,
    order: &Order,
  ) -> Result<VerificationReport, OrderError>;
}
