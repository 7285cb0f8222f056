use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::auth::entities::{RoleBinding, User};
use crate::domain::order::entities::{Order, VerificationReport};

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(min = 1, max = 255, message = "Name is required"))]
  pub name: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, max = 128, message = "Password is required"))]
  pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for updating a user's credentials. Both fields are optional but
/// not both absent; that case is rejected by the domain.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
  pub email: Option<String>,
  pub password: Option<String>,
}

/// User as exposed to callers: no password material, ever
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub roles: Vec<RoleBinding>,
}

impl From<User> for UserDto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      email: user.email,
      roles: user.roles,
    }
  }
}

/// Response for register/login: the user plus their session token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
  pub user: UserDto,
  pub token: String,
}

/// Admin reference in a franchise-creation request
#[derive(Debug, Clone, Deserialize)]
pub struct AdminEmail {
  pub email: String,
}

/// Request for creating a franchise
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFranchiseRequest {
  #[validate(length(min = 1, max = 255, message = "Franchise name is required"))]
  pub name: String,

  #[serde(default)]
  pub admins: Vec<AdminEmail>,
}

/// Request for creating a store
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoreRequest {
  #[validate(length(min = 1, max = 255, message = "Store name is required"))]
  pub name: String,
}

/// Request for adding a menu item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMenuItemRequest {
  #[validate(length(min = 1, max = 255, message = "Title is required"))]
  pub title: String,

  pub description: String,
  pub image: String,
  pub price: Decimal,
}

/// Request for placing an order
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
  pub franchise_id: Uuid,
  pub store_id: Uuid,
  pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
  pub menu_item_id: Uuid,
  pub description: String,
  pub price: Decimal,
}

/// Query parameters for order listing
#[derive(Debug, Clone, Deserialize)]
pub struct OrderListQuery {
  pub page: Option<u32>,
}

/// Response for order placement
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderDto {
  pub order: Order,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub verification: Option<VerificationReport>,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::entities::Role;

  #[test]
  fn test_register_request_validation() {
    let valid = RegisterRequest {
      name: "pizza diner".into(),
      email: "reg@test.com".into(),
      password: "a".into(),
    };
    assert!(valid.validate().is_ok());

    let bad_email = RegisterRequest {
      name: "pizza diner".into(),
      email: "not-an-email".into(),
      password: "a".into(),
    };
    assert!(bad_email.validate().is_err());

    let empty_password = RegisterRequest {
      name: "pizza diner".into(),
      email: "reg@test.com".into(),
      password: "".into(),
    };
    assert!(empty_password.validate().is_err());
  }

  #[test]
  fn test_user_dto_has_no_password_field() {
    let user = User::new(
      "Jane".into(),
      "jane@x.com".into(),
      "$argon2id$secret-material".into(),
      vec![RoleBinding::new(Role::Diner)],
    );
    let dto = UserDto::from(user);
    let json = serde_json::to_string(&dto).unwrap();
    assert!(!json.contains("password"));
    assert!(!json.contains("secret-material"));
  }

  #[test]
  fn test_create_franchise_request_admins_default_empty() {
    let request: CreateFranchiseRequest =
      serde_json::from_str(r#"{"name": "SliceWorks"}"#).unwrap();
    assert!(request.admins.is_empty());

    let with_admins: CreateFranchiseRequest =
      serde_json::from_str(r#"{"name": "SliceWorks", "admins": [{"email": "f@jwt.com"}]}"#)
        .unwrap();
    assert_eq!(with_admins.admins[0].email, "f@jwt.com");
  }
}
