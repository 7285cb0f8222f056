use actix_web::{
  Error, HttpMessage,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::adapters::http::errors::ApiError;
use crate::domain::auth::entities::Identity;
use crate::domain::auth::services::AuthService;

/// Identity currently attached to a request.
///
/// `None` covers both "no token presented" and "token did not resolve";
/// routes that require an identity turn both into 401.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

/// Identity-resolution middleware.
///
/// Reads the optional `Authorization: Bearer <token>` header, resolves it
/// through the credential manager, and attaches the outcome to request
/// extensions. Resolution never rejects the request by itself — anonymous
/// requests flow through so that open routes (menu, franchise listing)
/// keep working. Only a store failure produces an error response here.
pub struct IdentityMiddleware {
  auth_service: Arc<AuthService>,
}

impl IdentityMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = IdentityMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(IdentityMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct IdentityMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let auth_service = self.auth_service.clone();

    Box::pin(async move {
      let token = extract_bearer_token(&req);

      let identity = match auth_service.resolve_identity(token.as_deref()).await {
        Ok(identity) => identity,
        Err(e) => {
          let api_error: ApiError = e.into();
          let (request, _) = req.into_parts();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(CurrentIdentity(identity));

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header, if any
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
}

/// Extension trait to read the resolved identity in handlers
pub trait IdentityExt {
  /// The identity resolved for this request, if any
  fn current_identity(&self) -> Option<Identity>;
}

impl IdentityExt for actix_web::HttpRequest {
  fn current_identity(&self) -> Option<Identity> {
    self
      .extensions()
      .get::<CurrentIdentity>()
      .and_then(|current| current.0.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_bearer_token() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer a.b.c"))
      .to_srv_request();
    assert_eq!(extract_bearer_token(&req).as_deref(), Some("a.b.c"));
  }

  #[test]
  fn test_missing_header_is_anonymous() {
    let req = TestRequest::default().to_srv_request();
    assert!(extract_bearer_token(&req).is_none());
  }

  #[test]
  fn test_non_bearer_header_is_anonymous() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();
    assert!(extract_bearer_token(&req).is_none());
  }
}
