use std::path::PathBuf;

const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
const DEFAULT_VISION_MODEL: &str = "gpt-4o";
const DEFAULT_IMAGE_MODEL: &str = "gpt-4.1-mini";

/// Read once at startup, immutable afterwards. A missing API key is not a
/// startup error; upstream calls fail with an authorization error instead.
#[derive(Clone)]
pub struct AppConfig {
  pub port: u16,
  pub openai_api_key: String,
  pub chat_completions_url: String,
  pub responses_url: String,
  pub vision_model: String,
  pub image_model: String,
  pub log_path: PathBuf,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      port: 3000,
      openai_api_key: String::new(),
      chat_completions_url: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
      responses_url: DEFAULT_RESPONSES_URL.to_string(),
      vision_model: DEFAULT_VISION_MODEL.to_string(),
      image_model: DEFAULT_IMAGE_MODEL.to_string(),
      log_path: PathBuf::from("ai-gateway.log"),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      port: env_var("PORT")
        .and_then(|p| p.parse().ok())
        .unwrap_or(defaults.port),
      openai_api_key: env_var("OPENAI_API_KEY").unwrap_or(defaults.openai_api_key),
      chat_completions_url: env_var("OPENAI_CHAT_URL").unwrap_or(defaults.chat_completions_url),
      responses_url: env_var("OPENAI_RESPONSES_URL").unwrap_or(defaults.responses_url),
      vision_model: env_var("VISION_MODEL").unwrap_or(defaults.vision_model),
      image_model: env_var("IMAGE_MODEL").unwrap_or(defaults.image_model),
      log_path: env_var("GATEWAY_LOG")
        .map(PathBuf::from)
        .unwrap_or(defaults.log_path),
    }
  }
}

fn env_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
