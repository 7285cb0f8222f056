use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::order::entities::{Order, OrderDraft, OrderItemDraft, VerificationReport};
use crate::domain::order::errors::OrderError;
use crate::domain::order::services::OrderService;
use crate::infrastructure::metrics::ServiceMetrics;

/// Command for placing an order
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
  pub franchise_id: Uuid,
  pub store_id: Uuid,
  pub items: Vec<PlaceOrderItem>,
}

#[derive(Debug, Clone)]
pub struct PlaceOrderItem {
  pub menu_item_id: Uuid,
  pub description: String,
  pub price: Decimal,
}

/// Response after order placement.
///
/// `verification` is absent when the factory could not confirm the order;
/// the order itself is committed either way.
#[derive(Debug, Clone)]
pub struct PlaceOrderResponse {
  pub order: Order,
  pub verification: Option<VerificationReport>,
}

/// Use case for placing an order as the authenticated diner
pub struct PlaceOrderUseCase {
  order_service: Arc<OrderService>,
  metrics: ServiceMetrics,
}

impl PlaceOrderUseCase {
  pub fn new(order_service: Arc<OrderService>, metrics: ServiceMetrics) -> Self {
    Self {
      order_service,
      metrics,
    }
  }

  pub async fn execute(
    &self,
    identity: Option<&Identity>,
    command: PlaceOrderCommand,
  ) -> Result<PlaceOrderResponse, OrderError> {
    let draft = OrderDraft {
      franchise_id: command.franchise_id,
      store_id: command.store_id,
      items: command
        .items
        .into_iter()
        .map(|item| OrderItemDraft {
          menu_item_id: item.menu_item_id,
          description: item.description,
          price: item.price,
        })
        .collect(),
    };

    match self.order_service.place_order(identity, draft).await {
      Ok((order, verification)) => {
        let revenue: Decimal = order.items.iter().map(|i| i.price).sum();
        self.metrics.record_order(order.items.len(), revenue);
        Ok(PlaceOrderResponse {
          order,
          verification,
        })
      }
      Err(e) => {
        self.metrics.record_failed_order();
        Err(e)
      }
    }
  }
}
