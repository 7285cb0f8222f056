use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::errors::AuthError;
use crate::domain::franchise::errors::FranchiseError;
use crate::domain::order::errors::OrderError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses.
///
/// Internal variants carry the loggable detail; the caller-facing body is
/// always a generic message. Password hashes, the signing secret, and raw
/// store errors never reach a response.
#[derive(Debug)]
pub enum ApiError {
  /// Malformed or incomplete input (400)
  Validation(String),

  /// Bad credentials, or no valid session where one is required (401)
  Unauthenticated(String),

  /// Authenticated but not authorized (403)
  Forbidden,

  /// Referenced entity absent or out of scope (404)
  NotFound(String),

  /// Unique-constraint violation (409)
  Conflict(String),

  /// Everything else (500); detail is logged, not returned
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
      ApiError::Forbidden => write!(f, "Forbidden"),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Unauthenticated(msg) => ("unauthorized", msg.clone()),
      ApiError::Forbidden => (
        "forbidden",
        "Insufficient permissions to perform this action".to_string(),
      ),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Internal(detail) => {
        // Log the detail; the caller gets a generic message only
        tracing::error!("Internal error: {}", detail);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(ErrorResponse {
        error: error_type.to_string(),
        message,
      })
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => {
        ApiError::Unauthenticated("Invalid email or password".to_string())
      }
      AuthError::Unauthenticated => {
        ApiError::Unauthenticated("Authentication required".to_string())
      }
      AuthError::Forbidden => ApiError::Forbidden,
      AuthError::EmailAlreadyExists => {
        ApiError::Conflict("An account with this email already exists".to_string())
      }
      AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
      AuthError::Validation(e) => ApiError::Validation(e.to_string()),
      AuthError::ValueObject(e) => ApiError::Validation(e.to_string()),
      AuthError::Hash(e) => ApiError::Internal(e.to_string()),
      AuthError::Token(e) => ApiError::Internal(e.to_string()),
      AuthError::Repository(e) => ApiError::Internal(e.to_string()),
    }
  }
}

impl From<FranchiseError> for ApiError {
  fn from(error: FranchiseError) -> Self {
    match error {
      FranchiseError::NotFound => ApiError::NotFound("Franchise not found".to_string()),
      FranchiseError::StoreNotFound => ApiError::NotFound("Store not found".to_string()),
      FranchiseError::NameAlreadyExists => {
        ApiError::Conflict("A franchise with this name already exists".to_string())
      }
      FranchiseError::UnknownAdminEmail(email) => {
        ApiError::Validation(format!("Unknown admin email: {}", email))
      }
      FranchiseError::Auth(e) => ApiError::from(e),
      FranchiseError::Repository(e) => ApiError::Internal(e.to_string()),
    }
  }
}

impl From<OrderError> for ApiError {
  fn from(error: OrderError) -> Self {
    match error {
      OrderError::MenuItemNotFound(id) => {
        ApiError::NotFound(format!("Menu item not found: {}", id))
      }
      OrderError::NoItems => {
        ApiError::Validation("Order must contain at least one item".to_string())
      }
      OrderError::VerificationFailed(e) => ApiError::Internal(e),
      OrderError::Auth(e) => ApiError::from(e),
      OrderError::Repository(e) => ApiError::Internal(e.to_string()),
    }
  }
}

/// Convert validation errors from the validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;

  #[test]
  fn test_status_codes() {
    assert_eq!(
      ApiError::Validation("x".into()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Unauthenticated("x".into()).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
      ApiError::NotFound("x".into()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Conflict("x".into()).status_code(),
      StatusCode::CONFLICT
    );
    assert_eq!(
      ApiError::Internal("x".into()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_unauthenticated_and_forbidden_are_distinct() {
    let unauthenticated: ApiError = AuthError::Unauthenticated.into();
    let forbidden: ApiError = AuthError::Forbidden.into();
    assert_eq!(unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn test_credential_failures_do_not_name_the_cause() {
    let error: ApiError = AuthError::InvalidCredentials.into();
    match error {
      ApiError::Unauthenticated(message) => {
        assert!(!message.to_lowercase().contains("unknown"));
        assert!(!message.to_lowercase().contains("wrong"));
      }
      other => panic!("unexpected mapping: {:?}", other),
    }
  }

  #[test]
  fn test_store_errors_never_reach_the_body() {
    let error: ApiError =
      AuthError::Repository(RepositoryError::QueryFailed("relation users".into())).into();
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // The body is built from the generic message, not the store detail;
    // ErrorResponse serialization is covered by the handler tests.
  }

  #[test]
  fn test_unknown_admin_email_names_the_email() {
    let error: ApiError = FranchiseError::UnknownAdminEmail("ghost@x.com".into()).into();
    match error {
      ApiError::Validation(message) => assert!(message.contains("ghost@x.com")),
      other => panic!("unexpected mapping: {:?}", other),
    }
  }
}
