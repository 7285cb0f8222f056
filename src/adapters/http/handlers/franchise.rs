use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CreateFranchiseRequest, CreateStoreRequest, SuccessResponse},
  errors::ApiError,
  middleware::IdentityExt,
};
use crate::application::franchise::{
  CreateFranchiseCommand, CreateFranchiseUseCase, CreateStoreCommand, CreateStoreUseCase,
  DeleteFranchiseUseCase, DeleteStoreUseCase, ListFranchisesUseCase, ListUserFranchisesUseCase,
};

/// Handler for listing all franchises (redacted for non-admins)
///
/// GET /api/franchise
pub async fn list_franchises_handler(
  use_case: web::Data<Arc<ListFranchisesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();
  let franchises = use_case.execute(identity.as_ref()).await?;
  Ok(HttpResponse::Ok().json(franchises))
}

/// Handler for listing the franchises a user administers
///
/// GET /api/franchise/{user_id}
pub async fn list_user_franchises_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ListUserFranchisesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();
  let franchises = use_case
    .execute(identity.as_ref(), path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(franchises))
}

/// Handler for creating a franchise
///
/// POST /api/franchise
pub async fn create_franchise_handler(
  request: web::Json<CreateFranchiseRequest>,
  use_case: web::Data<Arc<CreateFranchiseUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let identity = http_req.current_identity();
  let command = CreateFranchiseCommand {
    name: request.name.clone(),
    admin_emails: request.admins.iter().map(|a| a.email.clone()).collect(),
  };

  let franchise = use_case.execute(identity.as_ref(), command).await?;
  Ok(HttpResponse::Ok().json(franchise))
}

/// Handler for deleting a franchise
///
/// DELETE /api/franchise/{franchise_id}
pub async fn delete_franchise_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteFranchiseUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();
  use_case.execute(identity.as_ref(), path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "franchise deleted".to_string(),
  }))
}

/// Handler for creating a store under a franchise
///
/// POST /api/franchise/{franchise_id}/store
pub async fn create_store_handler(
  path: web::Path<Uuid>,
  request: web::Json<CreateStoreRequest>,
  use_case: web::Data<Arc<CreateStoreUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let identity = http_req.current_identity();
  let command = CreateStoreCommand {
    franchise_id: path.into_inner(),
    name: request.name.clone(),
  };

  let store = use_case.execute(identity.as_ref(), command).await?;
  Ok(HttpResponse::Ok().json(store))
}

/// Handler for deleting a store
///
/// DELETE /api/franchise/{franchise_id}/store/{store_id}
pub async fn delete_store_handler(
  path: web::Path<(Uuid, Uuid)>,
  use_case: web::Data<Arc<DeleteStoreUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let identity = http_req.current_identity();
  let (franchise_id, store_id) = path.into_inner();

  use_case
    .execute(identity.as_ref(), franchise_id, store_id)
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "store deleted".to_string(),
  }))
}
