use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::auth::entities::Identity;
use crate::domain::order::entities::{Order, VerificationReport};
use crate::domain::order::errors::OrderError;
use crate::domain::order::ports::OrderVerifier;

use super::config::FactoryConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct FactoryRequest<'a> {
  diner: DinerInfo,
  order: &'a Order,
}

#[derive(Debug, Serialize)]
struct DinerInfo {
  id: Uuid,
  name: String,
  email: String,
}

#[derive(Debug, Deserialize)]
struct FactoryResponse {
  jwt: String,
  #[serde(rename = "reportUrl")]
  report_url: Option<String>,
}

/// HTTP client for the external order-verification factory.
///
/// The factory's verdict is advisory: callers forward already-committed
/// orders and treat any failure here as non-fatal. The response body is
/// deserialized into plain data and nothing more — it is never evaluated,
/// logged verbatim, or interpolated anywhere executable.
pub struct HttpOrderVerifier {
  client: reqwest::Client,
  url: String,
  api_key: String,
}

impl HttpOrderVerifier {
  pub fn new(config: &FactoryConfig) -> Result<Self, OrderError> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(|e| OrderError::VerificationFailed(e.to_string()))?;

    Ok(Self {
      client,
      url: format!("{}/api/order", config.url.trim_end_matches('/')),
      api_key: config.api_key.clone(),
    })
  }
}

#[async_trait]
impl OrderVerifier for HttpOrderVerifier {
  async fn verify(
    &self,
    diner: &Identity,
    order: &Order,
  ) -> Result<VerificationReport, OrderError> {
    let payload = FactoryRequest {
      diner: DinerInfo {
        id: diner.user_id,
        name: diner.name.clone(),
        email: diner.email.clone(),
      },
      order,
    };

    let response = self
      .client
      .post(&self.url)
      .bearer_auth(&self.api_key)
      .json(&payload)
      .send()
      .await
      .map_err(|e| OrderError::VerificationFailed(e.to_string()))?;

    if !response.status().is_success() {
      return Err(OrderError::VerificationFailed(format!(
        "factory returned {}",
        response.status()
      )));
    }

    let verdict: FactoryResponse = response
      .json()
      .await
      .map_err(|e| OrderError::VerificationFailed(e.to_string()))?;

    Ok(VerificationReport {
      jwt: verdict.jwt,
      report_url: verdict.report_url,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_url_normalization() {
    let config = FactoryConfig {
      url: "https://factory.example/".into(),
      api_key: "k".into(),
    };
    let verifier = HttpOrderVerifier::new(&config).unwrap();
    assert_eq!(verifier.url, "https://factory.example/api/order");
  }

  #[test]
  fn test_response_shape() {
    let verdict: FactoryResponse = serde_json::from_str(
      r#"{"jwt":"1111111111","reportUrl":"http://factory.example.com/report"}"#,
    )
    .unwrap();
    assert_eq!(verdict.jwt, "1111111111");
    assert_eq!(
      verdict.report_url.as_deref(),
      Some("http://factory.example.com/report")
    );

    // reportUrl is optional
    let bare: FactoryResponse = serde_json::from_str(r#"{"jwt":"1"}"#).unwrap();
    assert!(bare.report_url.is_none());
  }
}
