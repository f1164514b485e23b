//! TTS (Text-to-Speech) client.

use super::types::{
    SynthesisMetadata, SynthesisPayload, SynthesisRequest, SynthesisResult, SynthesisSuccess,
    VoiceCatalog, VoiceListBody,
};
use crate::config::TtsConfig;
use crate::credential::ApiKey;
use crate::storage::AudioStore;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Client for the ElevenLabs text-to-speech API.
///
/// Construct once and reuse. `synthesize*` and `list_voices` never return `Err`:
/// every failure comes back as the `Failure` arm of the outcome.
pub struct TtsClient {
    transport: HttpTransport,
    store: AudioStore,
    config: TtsConfig,
}

impl TtsClient {
    /// Client with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    pub fn config(&self) -> &TtsConfig {
        &self.config
    }

    pub fn store(&self) -> &AudioStore {
        &self.store
    }

    /// Synthesize `text` with the configured default voice and model.
    pub async fn synthesize(&self, text: &str) -> SynthesisResult {
        self.synthesize_with(&SynthesisRequest::new(text)).await
    }

    pub async fn synthesize_with(&self, request: &SynthesisRequest) -> SynthesisResult {
        match self.try_synthesize(request).await {
            Ok(success) => SynthesisResult::Success(success),
            Err(e) => {
                warn!(kind = %e.kind(), status = ?e.status_code(), "synthesis failed: {}", e);
                e.into()
            }
        }
    }

    async fn try_synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisSuccess> {
        if request.text.trim().is_empty() {
            return Err(Error::validation_with_context(
                "text must not be empty",
                ErrorContext::new()
                    .with_field_path("request.text")
                    .with_source("tts"),
            ));
        }
        let voice_id = request.voice_id.as_deref().unwrap_or(&self.config.voice_id);
        let model_id = request.model_id.as_deref().unwrap_or(&self.config.model_id);
        if voice_id.is_empty()
            || !voice_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::validation_with_context(
                "voice_id must be a non-empty identifier of letters, digits, '_' or '-'",
                ErrorContext::new()
                    .with_field_path("request.voice_id")
                    .with_source("tts"),
            ));
        }
        // Reject a bad filename before spending a request on it.
        if let Some(name) = &request.filename {
            self.store.path_for(name)?;
        }

        let payload = serde_json::to_value(SynthesisPayload {
            text: &request.text,
            model_id,
            voice_settings: self.config.voice_settings,
        })?;
        debug!(voice_id, model_id, chars = request.text.len(), "synthesizing");

        let response = self
            .transport
            .post_json(&format!("text-to-speech/{}", voice_id), &payload)
            .await?
            .error_for_status()?;

        let audio_path = self
            .store
            .persist(&response.body, request.filename.as_deref())
            .await?;

        Ok(SynthesisSuccess {
            metadata: SynthesisMetadata {
                text: request.text.clone(),
                voice_id: voice_id.to_string(),
                model_id: model_id.to_string(),
                content_type: response.content_type,
                content_length: response.body.len(),
            },
            audio: response.body,
            audio_path,
        })
    }

    /// List the voices available to this API key.
    pub async fn list_voices(&self) -> VoiceCatalog {
        match self.try_list_voices().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(kind = %e.kind(), status = ?e.status_code(), "listing voices failed: {}", e);
                e.into()
            }
        }
    }

    async fn try_list_voices(&self) -> Result<VoiceCatalog> {
        let response = self.transport.get("voices").await?.error_for_status()?;
        let body: VoiceListBody = serde_json::from_slice(&response.body)?;
        let voices = body.into_voices();
        debug!(count = voices.len(), "voices listed");
        Ok(VoiceCatalog::Success { voices })
    }

    /// Write audio bytes to the output directory. Generates a unique `.mp3` name when
    /// `filename` is `None`.
    pub async fn persist_audio(&self, audio: &[u8], filename: Option<&str>) -> Result<PathBuf> {
        self.store.persist(audio, filename).await
    }
}

pub struct TtsClientBuilder {
    api_key: Option<String>,
    config: TtsConfig,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            config: TtsConfig::default(),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the whole configuration. Later setters still apply on top.
    pub fn config(mut self, config: TtsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.config.voice_id = voice_id.into();
        self
    }

    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.config.model_id = model_id.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the client. Without an explicit key, falls back to [`ApiKey::from_env`].
    pub fn build(self) -> Result<TtsClient> {
        let api_key = match self.api_key {
            Some(key) => ApiKey::new(key)?,
            None => ApiKey::from_env()?,
        };
        self.config.validate()?;
        let transport = HttpTransport::new(&self.config, &api_key)?;
        let store = AudioStore::new(self.config.output_dir.clone());
        Ok(TtsClient {
            transport,
            store,
            config: self.config,
        })
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn empty_api_key_fails_construction() {
        let err = TtsClient::new("").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn builder_applies_overrides() {
        let client = TtsClient::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:1/v1")
            .voice_id("voice")
            .model_id("model")
            .output_dir("out")
            .timeout_secs(3)
            .build()
            .unwrap();
        let config = client.config();
        assert_eq!(config.voice_id, "voice");
        assert_eq!(config.model_id, "model");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(client.store().output_dir(), std::path::Path::new("out"));
    }

    #[tokio::test]
    async fn empty_text_fails_without_request() {
        // Port 1 is never listening; a request would surface as a transport failure.
        let client = TtsClient::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:1/v1")
            .build()
            .unwrap();
        let result = client.synthesize("   ").await;
        let failure = result.failure().unwrap();
        assert_eq!(failure.kind, ErrorKind::Validation);
        assert_eq!(failure.status_code, None);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_failure() {
        let client = TtsClient::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:1/v1")
            .build()
            .unwrap();
        let catalog = client.list_voices().await;
        assert_eq!(catalog.failure().unwrap().kind, ErrorKind::Transport);
    }
}
