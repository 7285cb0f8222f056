use std::sync::Arc;

use crate::domain::order::entities::MenuItem;
use crate::domain::order::errors::OrderError;
use crate::domain::order::services::OrderService;

/// Use case for reading the menu (open to anonymous callers)
pub struct GetMenuUseCase {
  order_service: Arc<OrderService>,
}

impl GetMenuUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(&self) -> Result<Vec<MenuItem>, OrderError> {
    self.order_service.get_menu().await
  }
}
