use actix_web::{
  Error,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  time::Instant,
};

use crate::infrastructure::metrics::ServiceMetrics;

/// Request-counting middleware.
///
/// Records the method counter and the latency histogram for every request.
/// Both are atomic increments against the process-wide aggregate; nothing
/// here blocks or fails the request.
pub struct MetricsMiddleware {
  metrics: ServiceMetrics,
}

impl MetricsMiddleware {
  pub fn new(metrics: ServiceMetrics) -> Self {
    Self { metrics }
  }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = MetricsMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(MetricsMiddlewareService {
      service: Rc::new(service),
      metrics: self.metrics.clone(),
    }))
  }
}

pub struct MetricsMiddlewareService<S> {
  service: Rc<S>,
  metrics: ServiceMetrics,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let metrics = self.metrics.clone();
    let method = req.method().as_str().to_string();

    Box::pin(async move {
      let started = Instant::now();
      let res = service.call(req).await?;
      metrics.record_request(&method, started.elapsed());
      Ok(res)
    })
  }
}
