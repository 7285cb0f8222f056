use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase, UpdateUserUseCase,
};
use crate::application::franchise::{
  CreateFranchiseUseCase, CreateStoreUseCase, DeleteFranchiseUseCase, DeleteStoreUseCase,
  ListFranchisesUseCase, ListUserFranchisesUseCase,
};
use crate::application::order::{
  AddMenuItemUseCase, GetMenuUseCase, ListOrdersUseCase, PlaceOrderUseCase,
};

use super::handlers::auth::{
  login_handler, logout_handler, register_handler, update_user_handler,
};
use super::handlers::franchise::{
  create_franchise_handler, create_store_handler, delete_franchise_handler, delete_store_handler,
  list_franchises_handler, list_user_franchises_handler,
};
use super::handlers::order::{
  add_menu_item_handler, get_menu_handler, list_orders_handler, place_order_handler,
};

/// Configure authentication routes
///
/// - POST   /api/auth            register
/// - PUT    /api/auth            login
/// - DELETE /api/auth            logout
/// - PUT    /api/auth/{user_id}  update credentials
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  logout_use_case: Arc<LogoutUserUseCase>,
  update_user_use_case: Arc<UpdateUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(logout_use_case))
    .app_data(web::Data::new(update_user_use_case))
    .route("", web::post().to(register_handler))
    .route("", web::put().to(login_handler))
    .route("", web::delete().to(logout_handler))
    .route("/{user_id}", web::put().to(update_user_handler));
}

/// Configure franchise routes
///
/// - GET    /api/franchise                                  list (redacted for non-admins)
/// - POST   /api/franchise                                  create (admin)
/// - GET    /api/franchise/{user_id}                        franchises a user administers
/// - DELETE /api/franchise/{franchise_id}                   delete (admin)
/// - POST   /api/franchise/{franchise_id}/store             create store
/// - DELETE /api/franchise/{franchise_id}/store/{store_id}  delete store
pub fn configure_franchise_routes(
  cfg: &mut web::ServiceConfig,
  list_use_case: Arc<ListFranchisesUseCase>,
  list_user_use_case: Arc<ListUserFranchisesUseCase>,
  create_use_case: Arc<CreateFranchiseUseCase>,
  delete_use_case: Arc<DeleteFranchiseUseCase>,
  create_store_use_case: Arc<CreateStoreUseCase>,
  delete_store_use_case: Arc<DeleteStoreUseCase>,
) {
  cfg
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(list_user_use_case))
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(create_store_use_case))
    .app_data(web::Data::new(delete_store_use_case))
    .route("", web::get().to(list_franchises_handler))
    .route("", web::post().to(create_franchise_handler))
    .route("/{user_id}", web::get().to(list_user_franchises_handler))
    .route("/{franchise_id}", web::delete().to(delete_franchise_handler))
    .route(
      "/{franchise_id}/store",
      web::post().to(create_store_handler),
    )
    .route(
      "/{franchise_id}/store/{store_id}",
      web::delete().to(delete_store_handler),
    );
}

/// Configure order routes
///
/// - GET  /api/order/menu  read the menu (anonymous OK)
/// - PUT  /api/order/menu  add a menu item (admin)
/// - GET  /api/order       the caller's order history
/// - POST /api/order       place an order
pub fn configure_order_routes(
  cfg: &mut web::ServiceConfig,
  get_menu_use_case: Arc<GetMenuUseCase>,
  add_menu_item_use_case: Arc<AddMenuItemUseCase>,
  list_orders_use_case: Arc<ListOrdersUseCase>,
  place_order_use_case: Arc<PlaceOrderUseCase>,
) {
  cfg
    .app_data(web::Data::new(get_menu_use_case))
    .app_data(web::Data::new(add_menu_item_use_case))
    .app_data(web::Data::new(list_orders_use_case))
    .app_data(web::Data::new(place_order_use_case))
    .route("/menu", web::get().to(get_menu_handler))
    .route("/menu", web::put().to(add_menu_item_handler))
    .route("", web::get().to(list_orders_handler))
    .route("", web::post().to(place_order_handler));
}
