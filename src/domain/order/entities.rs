use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable menu item. Prices are decimal-safe; they are never
/// compared or stored as binary floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
  pub id: Uuid,
  pub title: String,
  pub description: String,
  pub image: String,
  pub price: Decimal,
}

impl MenuItem {
  pub fn new(title: String, description: String, image: String, price: Decimal) -> Self {
    Self {
      id: Uuid::new_v4(),
      title,
      description,
      image,
      price,
    }
  }
}

/// An order. Created once, then read-only: item snapshots never change
/// after the order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub diner_id: Uuid,
  pub franchise_id: Uuid,
  pub store_id: Uuid,
  pub created_at: DateTime<Utc>,
  pub items: Vec<OrderItem>,
}

/// Denormalized copy of a menu item taken at order time, so later menu
/// edits never retroactively change order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: Uuid,
  pub menu_item_id: Uuid,
  pub description: String,
  pub price: Decimal,
}

/// An order as submitted by a diner
#[derive(Debug, Clone)]
pub struct OrderDraft {
  pub franchise_id: Uuid,
  pub store_id: Uuid,
  pub items: Vec<OrderItemDraft>,
}

#[derive(Debug, Clone)]
pub struct OrderItemDraft {
  pub menu_item_id: Uuid,
  pub description: String,
  pub price: Decimal,
}

/// One page of a diner's order history, insertion-ordered
#[derive(Debug, Clone, Serialize)]
pub struct OrderPage {
  pub diner_id: Uuid,
  pub orders: Vec<Order>,
  pub page: u32,
}

/// Verdict returned by the external order-verification collaborator.
///
/// Advisory only: the order is the system of record and persists whether
/// or not verification succeeds. The collaborator's response is treated
/// strictly as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
  pub jwt: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub report_url: Option<String>,
}
