//! Webhook server exposing `POST /tts` and `GET /voices`.
//!
//! Reads ELEVENLABS_API_KEY and the ELEVENLABS_* configuration variables; listens on
//! TTS_WEBHOOK_ADDR (default 0.0.0.0:5000).

use elevenlabs_tts::webhook::{create_router, AppState, DEFAULT_BIND_ADDR};
use elevenlabs_tts::{TtsClient, TtsConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TtsConfig::from_env()?;
    let client = TtsClient::builder().config(config).build()?;
    let app = create_router(AppState::new(client));

    let addr = std::env::var("TTS_WEBHOOK_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("webhook listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
