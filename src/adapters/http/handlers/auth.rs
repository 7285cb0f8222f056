use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    AuthResponse, LoginRequest, RegisterRequest, SuccessResponse, UpdateUserRequest, UserDto,
  },
  errors::ApiError,
  middleware::IdentityExt,
};
use crate::application::auth::{
  LoginUserCommand, LoginUserUseCase, LogoutUserUseCase, RegisterUserCommand, RegisterUserUseCase,
  UpdateUserCommand, UpdateUserUseCase,
};

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or_else(|| ApiError::Unauthenticated("Authentication required".to_string()))
}

/// Handler for user registration
///
/// POST /api/auth
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = RegisterUserCommand {
    name: request.name.clone(),
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(AuthResponse {
    user: UserDto::from(response.user),
    token: response.token,
  }))
}

/// Handler for user login
///
/// PUT /api/auth
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(AuthResponse {
    user: UserDto::from(response.user),
    token: response.token,
  }))
}

/// Handler for user logout
///
/// DELETE /api/auth
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let token = extract_bearer_token(&http_req)?;

  use_case.execute(&token).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "logout successful".to_string(),
  }))
}

/// Handler for updating a user's credentials
///
/// PUT /api/auth/{user_id}
pub async fn update_user_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateUserRequest>,
  use_case: web::Data<Arc<UpdateUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();

  let command = UpdateUserCommand {
    user_id: path.into_inner(),
    email: request.email.clone(),
    password: request.password.clone(),
  };

  let user = use_case.execute(identity.as_ref(), command).await?;

  Ok(HttpResponse::Ok().json(UserDto::from(user)))
}
