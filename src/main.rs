mod config;
mod error;
mod intent;
mod logger;
mod models;
mod router;
mod upstream;

use std::sync::Arc;

use config::AppConfig;
use logger::Logger;
use router::{run_router, RouterState};
use upstream::OpenAiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  let config = Arc::new(AppConfig::from_env());
  let logger = Arc::new(Logger::new(&config.log_path)?);

  let listener = std::net::TcpListener::bind(("0.0.0.0", config.port))?;
  let port = listener.local_addr()?.port();
  logger.info(&format!("AI gateway listening on port {port}"));
  println!("Unified AI API is running on port {port}");

  let state = RouterState {
    upstream: OpenAiClient::new(config.clone()),
    config,
    logger,
  };

  run_router(listener, state).await
}
