//! Menu and order use cases

mod add_menu_item;
mod get_menu;
mod list_orders;
mod place_order;

pub use add_menu_item::{AddMenuItemCommand, AddMenuItemUseCase};
pub use get_menu::GetMenuUseCase;
pub use list_orders::ListOrdersUseCase;
pub use place_order::{PlaceOrderCommand, PlaceOrderItem, PlaceOrderResponse, PlaceOrderUseCase};
