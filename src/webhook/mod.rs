//! HTTP webhook wrapping a shared [`TtsClient`](crate::TtsClient).
//!
//! Routes:
//! - `POST /tts` with `{"text": ..., "voice_id"?: ..., "model_id"?: ...}`
//! - `GET /voices`
//! - `GET /health`

mod handlers;

use crate::TtsClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use handlers::TtsWebhookRequest;

/// Default listen address of the webhook binary.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

pub struct AppState {
    pub client: TtsClient,
}

impl AppState {
    pub fn new(client: TtsClient) -> Arc<Self> {
        Arc::new(Self { client })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tts", post(handlers::text_to_speech))
        .route("/voices", get(handlers::list_voices))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
