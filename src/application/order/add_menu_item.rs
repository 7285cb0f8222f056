use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::auth::entities::Identity;
use crate::domain::order::entities::MenuItem;
use crate::domain::order::errors::OrderError;
use crate::domain::order::services::OrderService;

/// Command for adding a menu item
#[derive(Debug, Clone)]
pub struct AddMenuItemCommand {
  pub title: String,
  pub description: String,
  pub image: String,
  pub price: Decimal,
}

/// Use case for adding a menu item (admin only).
/// Returns the refreshed menu rather than just the new item.
pub struct AddMenuItemUseCase {
  order_service: Arc<OrderService>,
}

impl AddMenuItemUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    command: AddMenuItemCommand,
  ) -> Result<Vec<MenuItem>, OrderError> {
    let item = MenuItem::new(
      command.title,
      command.description,
      command.image,
      command.price,
    );
    self.order_service.add_menu_item(identity, item).await
  }
}
