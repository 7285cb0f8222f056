use std::sync::Arc;

use crate::domain::auth::entities::Identity;
use crate::domain::order::entities::OrderPage;
use crate::domain::order::errors::OrderError;
use crate::domain::order::services::OrderService;

/// Use case for listing the caller's own orders, paginated
pub struct ListOrdersUseCase {
  order_service: Arc<OrderService>,
}

impl ListOrdersUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    page: Option<u32>,
  ) -> Result<OrderPage, OrderError> {
    self.order_service.list_orders(identity, page).await
  }
}
