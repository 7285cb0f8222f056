use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AddMenuItemRequest, OrderListQuery, PlaceOrderDto, PlaceOrderRequest},
  errors::ApiError,
  middleware::IdentityExt,
};
use crate::application::order::{
  AddMenuItemCommand, AddMenuItemUseCase, GetMenuUseCase, ListOrdersUseCase, PlaceOrderCommand,
  PlaceOrderItem, PlaceOrderUseCase,
};

/// Handler for reading the menu (open to anonymous callers)
///
/// GET /api/order/menu
pub async fn get_menu_handler(
  use_case: web::Data<Arc<GetMenuUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let menu = use_case.execute().await?;
  Ok(HttpResponse::Ok().json(menu))
}

/// Handler for adding a menu item; responds with the refreshed menu
///
/// PUT /api/order/menu
pub async fn add_menu_item_handler(
  request: web::Json<AddMenuItemRequest>,
  use_case: web::Data<Arc<AddMenuItemUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let identity = http_req.current_identity();
  let command = AddMenuItemCommand {
    title: request.title.clone(),
    description: request.description.clone(),
    image: request.image.clone(),
    price: request.price,
  };

  let menu = use_case.execute(identity.as_ref(), command).await?;
  Ok(HttpResponse::Ok().json(menu))
}

/// Handler for listing the caller's orders
///
/// GET /api/order?page=N
pub async fn list_orders_handler(
  query: web::Query<OrderListQuery>,
  use_case: web::Data<Arc<ListOrdersUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();
  let page = use_case.execute(identity.as_ref(), query.page).await?;
  Ok(HttpResponse::Ok().json(page))
}

/// Handler for placing an order
///
/// POST /api/order
pub async fn place_order_handler(
  request: web::Json<PlaceOrderRequest>,
  use_case: web::Data<Arc<PlaceOrderUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();

  let command = PlaceOrderCommand {
    franchise_id: request.franchise_id,
    store_id: request.store_id,
    items: request
      .items
      .iter()
      .map(|item| PlaceOrderItem {
        menu_item_id: item.menu_item_id,
        description: item.description.clone(),
        price: item.price,
      })
      .collect(),
  };

  let response = use_case.execute(identity.as_ref(), command).await?;

  Ok(HttpResponse::Ok().json(PlaceOrderDto {
    order: response.order,
    verification: response.verification,
  }))
}
