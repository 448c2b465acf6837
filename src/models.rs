use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
  pub role: String,
  pub content: Content,
}

/// Message content as the upstream accepts it: either a plain string or an
/// ordered list of typed parts. Pass-through must preserve whichever arrived.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum Content {
  Text(String),
  Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum ContentPart {
  #[serde(rename = "text")]
  Text { text: String },
  #[serde(rename = "image_url")]
  ImageUrl { image_url: ImageUrlData },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageUrlData {
  pub url: String,
}

/// Inbound `/api/message` body before validation.
#[derive(Deserialize)]
pub struct RawChatRequest {
  pub messages: Option<Vec<Message>>,
  pub model: Option<String>,
  pub max_tokens: Option<i64>,
}

#[derive(Debug)]
pub struct ChatRequest {
  pub messages: Vec<Message>,
  pub model: String,
  pub max_tokens: u32,
}

impl ChatRequest {
  /// First failing check determines the reported reason.
  pub fn validate(raw: RawChatRequest) -> Result<Self, GatewayError> {
    let messages = match raw.messages {
      Some(m) if !m.is_empty() => m,
      _ => {
        return Err(GatewayError::Validation(
          "messages must be a non-empty array.".to_string(),
        ))
      }
    };

    let model = match raw.model {
      Some(m) if !m.trim().is_empty() => m,
      _ => {
        return Err(GatewayError::Validation(
          "model must be a non-empty string.".to_string(),
        ))
      }
    };

    let max_tokens = match raw.max_tokens.and_then(|n| u32::try_from(n).ok()) {
      Some(n) if n > 0 => n,
      _ => {
        return Err(GatewayError::Validation(
          "max_tokens must be a positive integer.".to_string(),
        ))
      }
    };

    Ok(Self {
      messages,
      model,
      max_tokens,
    })
  }
}

#[derive(Deserialize)]
pub struct VisionRequest {
  pub image: Option<String>,
  pub prompt: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateImageRequest {
  pub prompt: Option<String>,
}

/// Payload for the chat completions endpoint.
#[derive(Serialize)]
pub struct ChatPayload {
  pub model: String,
  pub messages: Vec<Message>,
  pub max_tokens: u32,
}

/// Payload for the responses endpoint with the image generation tool enabled.
#[derive(Serialize)]
pub struct ImagePayload {
  pub model: String,
  pub input: String,
  pub tools: Vec<ToolSpec>,
}

#[derive(Serialize)]
pub struct ToolSpec {
  pub r#type: String,
}

impl ImagePayload {
  pub fn new(model: String, input: String) -> Self {
    Self {
      model,
      input,
      tools: vec![ToolSpec {
        r#type: "image_generation".to_string(),
      }],
    }
  }
}
