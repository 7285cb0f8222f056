use prometheus::{
  Counter, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use std::time::Duration;

use super::config::MetricsConfig;

/// Process-wide metrics aggregate.
///
/// A single instance is created at startup and a cheap clone of the handle
/// is passed wherever request handling needs to count something. All
/// counters are atomic; they are advisory telemetry and tolerate races.
/// Nothing here ever sits on the request path beyond an increment.
#[derive(Clone)]
pub struct ServiceMetrics {
  registry: Registry,
  http_requests: IntCounterVec,
  request_latency: Histogram,
  auth_successes: IntCounter,
  auth_failures: IntCounter,
  orders_placed: IntCounter,
  orders_failed: IntCounter,
  pizzas_sold: IntCounter,
  revenue: Counter,
}

impl ServiceMetrics {
  pub fn new(source: &str) -> Result<Self, prometheus::Error> {
    let labels = HashMap::from([("source".to_string(), source.to_string())]);
    let registry = Registry::new_custom(Some("sliceline".into()), Some(labels))?;

    let http_requests = IntCounterVec::new(
      Opts::new("http_requests_total", "HTTP requests served, by method"),
      &["method"],
    )?;
    let request_latency = Histogram::with_opts(HistogramOpts::new(
      "http_request_duration_seconds",
      "Request latency",
    ))?;
    let auth_successes = IntCounter::new("auth_success_total", "Successful authentications")?;
    let auth_failures = IntCounter::new("auth_failure_total", "Failed authentications")?;
    let orders_placed = IntCounter::new("orders_placed_total", "Orders committed to the store")?;
    let orders_failed = IntCounter::new("orders_failed_total", "Order placements that failed")?;
    let pizzas_sold = IntCounter::new("pizzas_sold_total", "Individual items sold")?;
    let revenue = Counter::new("revenue_total", "Accumulated order revenue")?;

    registry.register(Box::new(http_requests.clone()))?;
    registry.register(Box::new(request_latency.clone()))?;
    registry.register(Box::new(auth_successes.clone()))?;
    registry.register(Box::new(auth_failures.clone()))?;
    registry.register(Box::new(orders_placed.clone()))?;
    registry.register(Box::new(orders_failed.clone()))?;
    registry.register(Box::new(pizzas_sold.clone()))?;
    registry.register(Box::new(revenue.clone()))?;

    Ok(Self {
      registry,
      http_requests,
      request_latency,
      auth_successes,
      auth_failures,
      orders_placed,
      orders_failed,
      pizzas_sold,
      revenue,
    })
  }

  pub fn record_request(&self, method: &str, latency: Duration) {
    self.http_requests.with_label_values(&[method]).inc();
    self.request_latency.observe(latency.as_secs_f64());
  }

  pub fn record_auth_success(&self) {
    self.auth_successes.inc();
  }

  pub fn record_auth_failure(&self) {
    self.auth_failures.inc();
  }

  pub fn record_order(&self, item_count: usize, revenue: Decimal) {
    self.orders_placed.inc();
    self.pizzas_sold.inc_by(item_count as u64);
    // Lossy by design: revenue telemetry does not need decimal exactness
    if let Some(amount) = revenue.to_f64() {
      self.revenue.inc_by(amount);
    }
  }

  pub fn record_failed_order(&self) {
    self.orders_failed.inc();
  }

  /// Renders the registry in the Prometheus text exposition format
  pub fn encode(&self) -> Result<String, prometheus::Error> {
    TextEncoder::new().encode_to_string(&self.registry.gather())
  }
}

/// Spawns the background push loop.
///
/// Disabled when no sink is configured. Push failures are logged and
/// swallowed; the sink's response is opaque bytes that are dropped unread.
pub fn spawn_push_task(metrics: ServiceMetrics, config: MetricsConfig) {
  let Some(sink_url) = config.sink_url else {
    tracing::info!("Metrics push disabled: no sink configured");
    return;
  };

  let interval = Duration::from_secs(config.push_interval_seconds.max(1));
  let client = reqwest::Client::new();

  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
      ticker.tick().await;

      let body = match metrics.encode() {
        Ok(body) => body,
        Err(e) => {
          tracing::warn!("Failed to encode metrics: {}", e);
          continue;
        }
      };

      match client.post(&sink_url).body(body).send().await {
        Ok(response) if !response.status().is_success() => {
          tracing::warn!("Metrics sink returned {}", response.status());
        }
        Ok(_) => {}
        Err(e) => {
          tracing::warn!("Failed to push metrics: {}", e);
        }
      }
    }
  });
}
