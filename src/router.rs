use std::net::TcpListener;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::intent::{self, Intent};
use crate::logger::Logger;
use crate::models::{
  ChatPayload, ChatRequest, Content, ContentPart, GenerateImageRequest, ImagePayload,
  ImageUrlData, Message, RawChatRequest, VisionRequest,
};
use crate::upstream::OpenAiClient;

const VISION_MAX_TOKENS: u32 = 500;
const BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

pub struct RouterState {
  pub config: Arc<AppConfig>,
  pub upstream: OpenAiClient,
  pub logger: Arc<Logger>,
}

pub async fn run_router(listener: TcpListener, state: RouterState) -> anyhow::Result<()> {
  let app = Router::new()
    .route("/", get(health))
    .route("/api/message", post(message))
    .route("/api/analyze-image", post(analyze_image))
    .route("/api/generate-image", post(generate_image))
    .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
    .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
    .with_state(Arc::new(state));

  listener.set_nonblocking(true)?;
  let listener = tokio::net::TcpListener::from_std(listener)?;
  axum::serve(listener, app).await?;
  Ok(())
}

async fn health() -> &'static str {
  "AI API Interface is running (Chat, Vision, Image Generation)"
}

async fn message(
  State(state): State<Arc<RouterState>>,
  Json(raw): Json<RawChatRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
  logged(handle_message(&state, raw).await, &state.logger, "/api/message").map(Json)
}

async fn analyze_image(
  State(state): State<Arc<RouterState>>,
  Json(raw): Json<VisionRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
  logged(
    handle_analyze_image(&state, raw).await,
    &state.logger,
    "/api/analyze-image",
  )
  .map(Json)
}

async fn generate_image(
  State(state): State<Arc<RouterState>>,
  Json(raw): Json<GenerateImageRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
  logged(
    handle_generate_image(&state, raw).await,
    &state.logger,
    "/api/generate-image",
  )
  .map(Json)
}

async fn handle_message(
  state: &RouterState,
  raw: RawChatRequest,
) -> Result<serde_json::Value, GatewayError> {
  let req = ChatRequest::validate(raw)?;

  match intent::classify(intent::last_text(&req.messages)) {
    Intent::Chat => {
      let payload = build_chat_payload(req);
      let body = state.upstream.chat_completion(&payload).await?;
      Ok(chat_envelope(body))
    }
    Intent::ImageGeneration => {
      let input = intent::last_text(&req.messages).to_string();
      let payload = ImagePayload::new(state.config.image_model.clone(), input);
      let body = state.upstream.generate_image(&payload).await?;
      image_envelope(body)
    }
  }
}

async fn handle_analyze_image(
  state: &RouterState,
  raw: VisionRequest,
) -> Result<serde_json::Value, GatewayError> {
  let (image, prompt) = match (raw.image, raw.prompt) {
    (Some(image), Some(prompt)) if !image.is_empty() && !prompt.is_empty() => (image, prompt),
    _ => {
      return Err(GatewayError::Validation(
        "Missing image or prompt.".to_string(),
      ))
    }
  };

  let payload = build_vision_payload(&state.config, &image, &prompt);
  // Plain chat-completion consumers read this body directly; no envelope.
  state.upstream.chat_completion(&payload).await
}

async fn handle_generate_image(
  state: &RouterState,
  raw: GenerateImageRequest,
) -> Result<serde_json::Value, GatewayError> {
  let prompt = match raw.prompt {
    Some(p) if !p.trim().is_empty() => p,
    _ => return Err(GatewayError::Validation("Missing prompt.".to_string())),
  };

  let payload = ImagePayload::new(state.config.image_model.clone(), prompt);
  let body = state.upstream.generate_image(&payload).await?;
  image_envelope(body)
}

fn logged<T>(
  result: Result<T, GatewayError>,
  logger: &Logger,
  route: &str,
) -> Result<T, GatewayError> {
  if let Err(err) = &result {
    match err {
      GatewayError::Validation(reason) => logger.warn(&format!("{route} rejected: {reason}")),
      GatewayError::Upstream { message, .. } => {
        logger.error(&format!("{route} upstream failure: {message}"))
      }
    }
  }
  result
}

fn build_chat_payload(req: ChatRequest) -> ChatPayload {
  ChatPayload {
    model: req.model,
    messages: req.messages,
    max_tokens: req.max_tokens,
  }
}

fn build_vision_payload(config: &AppConfig, image: &str, prompt: &str) -> ChatPayload {
  let url = format!("data:image/jpeg;base64,{image}");
  let content = Content::Parts(vec![
    ContentPart::Text {
      text: prompt.to_string(),
    },
    ContentPart::ImageUrl {
      image_url: ImageUrlData { url },
    },
  ]);

  ChatPayload {
    model: config.vision_model.clone(),
    messages: vec![Message {
      role: "user".to_string(),
      content,
    }],
    max_tokens: VISION_MAX_TOKENS,
  }
}

fn chat_envelope(body: serde_json::Value) -> serde_json::Value {
  match body {
    serde_json::Value::Object(mut fields) => {
      fields.insert(
        "type".to_string(),
        serde_json::Value::String("chat".to_string()),
      );
      serde_json::Value::Object(fields)
    }
    other => serde_json::json!({ "type": "chat", "response": other }),
  }
}

fn image_envelope(body: serde_json::Value) -> Result<serde_json::Value, GatewayError> {
  let image = body["output"]
    .as_array()
    .and_then(|output| {
      output
        .iter()
        .find(|el| el["type"] == "image_generation_call")
    })
    .and_then(|call| call["result"].as_str());

  match image {
    Some(result) => Ok(serde_json::json!({ "type": "image", "imageBase64": result })),
    None => Err(GatewayError::upstream(
      "No image data returned from OpenAI.",
      serde_json::json!(body),
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn chat_payload_passes_fields_through() {
    let req = ChatRequest {
      messages: vec![Message {
        role: "user".to_string(),
        content: Content::Text("hi".to_string()),
      }],
      model: "gpt-4o-mini".to_string(),
      max_tokens: 150,
    };

    let payload = build_chat_payload(req);
    assert_eq!(payload.model, "gpt-4o-mini");
    assert_eq!(payload.max_tokens, 150);
    assert_eq!(payload.messages.len(), 1);
  }

  #[test]
  fn vision_payload_has_fixed_model_and_token_ceiling() {
    let config = AppConfig::default();
    let payload = build_vision_payload(&config, "abc123", "Describe this");

    assert_eq!(payload.model, config.vision_model);
    assert_eq!(payload.max_tokens, 500);
    assert_eq!(payload.messages.len(), 1);
    assert_eq!(payload.messages[0].role, "user");

    let json = serde_json::to_value(&payload.messages[0]).expect("serialize");
    assert_eq!(json["content"][0]["type"], "text");
    assert_eq!(json["content"][0]["text"], "Describe this");
    assert_eq!(json["content"][1]["type"], "image_url");
    assert_eq!(
      json["content"][1]["image_url"]["url"],
      "data:image/jpeg;base64,abc123"
    );
  }

  #[test]
  fn chat_envelope_preserves_upstream_fields() {
    let upstream = serde_json::json!({
      "choices": [{ "message": { "role": "assistant", "content": "hello" } }],
      "usage": { "total_tokens": 12 }
    });

    let envelope = chat_envelope(upstream.clone());
    assert_eq!(envelope["type"], "chat");
    assert_eq!(envelope["choices"], upstream["choices"]);
    assert_eq!(envelope["usage"], upstream["usage"]);
  }

  #[test]
  fn image_envelope_takes_first_generation_call() {
    let upstream = serde_json::json!({
      "output": [
        { "type": "reasoning", "summary": [] },
        { "type": "image_generation_call", "result": "base64-first" },
        { "type": "image_generation_call", "result": "base64-second" }
      ]
    });

    let envelope = image_envelope(upstream).expect("image present");
    assert_eq!(envelope["type"], "image");
    assert_eq!(envelope["imageBase64"], "base64-first");
  }

  #[test]
  fn image_envelope_fails_without_generation_call() {
    let upstream = serde_json::json!({
      "output": [{ "type": "message", "content": [] }]
    });

    let err = image_envelope(upstream).unwrap_err();
    assert_eq!(err.to_string(), "No image data returned from OpenAI.");
  }

  #[test]
  fn image_envelope_fails_on_missing_output() {
    let err = image_envelope(serde_json::json!({})).unwrap_err();
    assert_eq!(err.to_string(), "No image data returned from OpenAI.");
  }
}
