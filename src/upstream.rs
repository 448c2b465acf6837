use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::models::{ChatPayload, ImagePayload};

/// One outbound POST per call; no retries and no caching. Network failures,
/// non-2xx statuses, and undecodable bodies all surface as `Upstream` errors
/// carrying the best-available diagnostic.
#[derive(Clone)]
pub struct OpenAiClient {
  http: reqwest::Client,
  config: Arc<AppConfig>,
}

impl OpenAiClient {
  pub fn new(config: Arc<AppConfig>) -> Self {
    Self {
      http: reqwest::Client::new(),
      config,
    }
  }

  pub async fn chat_completion(
    &self,
    payload: &ChatPayload,
  ) -> Result<serde_json::Value, GatewayError> {
    self
      .post(
        &self.config.chat_completions_url,
        payload,
        "Failed to fetch response from OpenAI",
      )
      .await
  }

  pub async fn generate_image(
    &self,
    payload: &ImagePayload,
  ) -> Result<serde_json::Value, GatewayError> {
    self
      .post(
        &self.config.responses_url,
        payload,
        "OpenAI image generation request failed.",
      )
      .await
  }

  async fn post<T: Serialize>(
    &self,
    url: &str,
    payload: &T,
    failure_message: &str,
  ) -> Result<serde_json::Value, GatewayError> {
    let mut headers = HeaderMap::new();
    let bearer = format!("Bearer {}", self.config.openai_api_key);
    let value = HeaderValue::from_str(&bearer)
      .map_err(|err| GatewayError::upstream(failure_message, serde_json::json!(err.to_string())))?;
    headers.insert(AUTHORIZATION, value);

    let resp = self
      .http
      .post(url)
      .headers(headers)
      .json(payload)
      .send()
      .await
      .map_err(|err| GatewayError::upstream(failure_message, serde_json::json!(err.to_string())))?;

    if !resp.status().is_success() {
      let status = resp.status();
      let text = resp.text().await.unwrap_or_default();
      let details = serde_json::from_str::<serde_json::Value>(&text)
        .unwrap_or_else(|_| serde_json::json!(format!("OpenAI error ({status}): {text}")));
      return Err(GatewayError::upstream(failure_message, details));
    }

    resp
      .json::<serde_json::Value>()
      .await
      .map_err(|err| GatewayError::upstream(failure_message, serde_json::json!(err.to_string())))
  }
}
