use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
  #[error("{0}")]
  Validation(String),
  #[error("{message}")]
  Upstream {
    message: String,
    details: serde_json::Value,
  },
}

impl GatewayError {
  pub fn upstream(message: impl Into<String>, details: serde_json::Value) -> Self {
    Self::Upstream {
      message: message.into(),
      details,
    }
  }
}

/// Single mapping from the error taxonomy to an HTTP status and JSON body.
/// Handlers never pick status codes themselves.
pub fn status_and_body(err: &GatewayError) -> (StatusCode, serde_json::Value) {
  match err {
    GatewayError::Validation(reason) => (
      StatusCode::BAD_REQUEST,
      serde_json::json!({ "error": reason }),
    ),
    GatewayError::Upstream { message, details } => (
      StatusCode::INTERNAL_SERVER_ERROR,
      serde_json::json!({ "error": message, "details": details }),
    ),
  }
}

impl IntoResponse for GatewayError {
  fn into_response(self) -> Response {
    let (status, body) = status_and_body(&self);
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_maps_to_400_with_reason() {
    let err = GatewayError::Validation("model must be a non-empty string.".to_string());
    let (status, body) = status_and_body(&err);
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "model must be a non-empty string.");
    assert!(body.get("details").is_none());
  }

  #[test]
  fn upstream_maps_to_500_with_details() {
    let err = GatewayError::upstream(
      "Failed to fetch response from OpenAI",
      serde_json::json!({ "error": { "message": "bad key" } }),
    );
    let (status, body) = status_and_body(&err);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch response from OpenAI");
    assert_eq!(body["details"]["error"]["message"], "bad key");
  }
}
