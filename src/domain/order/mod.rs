pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{
  MenuItem, Order, OrderDraft, OrderItem, OrderItemDraft, OrderPage, VerificationReport,
};
pub use errors::OrderError;
pub use ports::{MenuRepository, OrderRepository, OrderVerifier};
pub use services::OrderService;
