use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::auth::policy;

use super::entities::{MenuItem, Order, OrderDraft, OrderPage, VerificationReport};
use super::errors::OrderError;
use super::ports::{MenuRepository, OrderRepository, OrderVerifier};

/// Menu and order flows.
///
/// Order placement persists first and forwards to the verification
/// collaborator afterwards; the committed order is never rolled back over
/// a verification failure.
pub struct OrderService {
  menu_repo: Arc<dyn MenuRepository>,
  order_repo: Arc<dyn OrderRepository>,
  verifier: Arc<dyn OrderVerifier>,
  page_size: u32,
}

impl OrderService {
  pub fn new(
    menu_repo: Arc<dyn MenuRepository>,
    order_repo: Arc<dyn OrderRepository>,
    verifier: Arc<dyn OrderVerifier>,
    page_size: u32,
  ) -> Self {
    Self {
      menu_repo,
      order_repo,
      verifier,
      page_size,
    }
  }

  /// Lists the menu. Open to anonymous callers.
  pub async fn get_menu(&self) -> Result<Vec<MenuItem>, OrderError> {
    self.menu_repo.list().await
  }

  /// Adds a menu item and returns the refreshed menu. Requires admin.
  pub async fn add_menu_item(
    &self,
    identity: Option<&Identity>,
    item: MenuItem,
  ) -> Result<Vec<MenuItem>, OrderError> {
    let identity = policy::require_identity(identity)?;
    policy::require_admin(identity)?;

    self.menu_repo.add(item).await?;
    self.menu_repo.list().await
  }

  /// Places an order for the authenticated diner.
  ///
  /// Returns the committed order together with the collaborator's verdict
  /// when verification succeeded. A verification failure is logged and
  /// reported as an absent verdict; it never unwinds the order.
  pub async fn place_order(
    &self,
    identity: Option<&Identity>,
    draft: OrderDraft,
  ) -> Result<(Order, Option<VerificationReport>), OrderError> {
    let identity = policy::require_identity(identity)?;

    if draft.items.is_empty() {
      return Err(OrderError::NoItems);
    }

    let order = self.order_repo.create(identity.user_id, draft).await?;

    let verification = match self.verifier.verify(identity, &order).await {
      Ok(report) => Some(report),
      Err(e) => {
        tracing::warn!(order_id = %order.id, "Order verification failed: {}", e);
        None
      }
    };

    Ok((order, verification))
  }

  /// One page of the caller's own order history, insertion-ordered.
  pub async fn list_orders(
    &self,
    identity: Option<&Identity>,
    page: Option<u32>,
  ) -> Result<OrderPage, OrderError> {
    let identity = policy::require_identity(identity)?;
    let page = page.unwrap_or(1).max(1);

    let orders = self
      .order_repo
      .list_for_diner(identity.user_id, page, self.page_size)
      .await?;

    Ok(OrderPage {
      diner_id: identity.user_id,
      orders,
      page,
    })
  }
}
