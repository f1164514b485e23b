use super::AppState;
use crate::tts::SynthesisRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone, Deserialize)]
pub struct TtsWebhookRequest {
    pub text: Option<String>,
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}

/// Run `fut` on its own task so a panic becomes a 500 instead of a dropped connection.
async fn guarded<F>(fut: F) -> Response
where
    F: Future<Output = Response> + Send + 'static,
{
    match tokio::spawn(fut).await {
        Ok(response) => response,
        Err(e) => {
            error!("webhook handler failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TtsWebhookRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let text = match body.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return error_response(StatusCode::BAD_REQUEST, "No text provided"),
    };

    let mut request = SynthesisRequest::new(text);
    request.voice_id = body.voice_id;
    request.model_id = body.model_id;

    guarded(async move {
        let result = state.client.synthesize_with(&request).await;
        Json(result).into_response()
    })
    .await
}

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Response {
    guarded(async move { Json(state.client.list_voices().await).into_response() }).await
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
