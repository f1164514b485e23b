//! Client configuration.
//!
//! Every field has a named default. Values can be overridden from environment
//! variables (`ELEVENLABS_*`) or loaded from a YAML file; unspecified keys keep
//! their defaults.

use crate::tts::VoiceSettings;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";
/// "Rachel", the service's stock voice.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";
pub const DEFAULT_OUTPUT_DIR: &str = "audio_output";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub voice_id: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
    pub timeout_secs: u64,
    pub proxy_url: Option<String>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_settings: VoiceSettings::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
        }
    }
}

impl TtsConfig {
    /// Defaults overridden by any `ELEVENLABS_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_source(path.display().to_string()),
            },
            other => other,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid configuration: {}", e),
                ErrorContext::new().with_details("expected a YAML mapping of TtsConfig fields"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var("ELEVENLABS_BASE_URL") {
            self.base_url = v;
        }
        if let Ok(v) = env::var("ELEVENLABS_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("ELEVENLABS_VOICE_ID") {
            self.voice_id = v;
        }
        if let Ok(v) = env::var("ELEVENLABS_MODEL_ID") {
            self.model_id = v;
        }
        if let Some(secs) = env::var("ELEVENLABS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.timeout_secs = secs;
        }
        if let Ok(v) = env::var("ELEVENLABS_PROXY_URL") {
            self.proxy_url = Some(v);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(self.base_url.clone()),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "Base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(url.scheme().to_string()),
            ));
        }
        if self.voice_id.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Default voice id must not be empty",
                ErrorContext::new().with_field_path("voice_id"),
            ));
        }
        if self.model_id.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "Default model id must not be empty",
                ErrorContext::new().with_field_path("model_id"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "Timeout must be at least one second",
                ErrorContext::new().with_field_path("timeout_secs"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_constants() {
        let config = TtsConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io/v1");
        assert_eq!(config.voice_id, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert_eq!(config.output_dir, PathBuf::from("audio_output"));
        assert_eq!(config.voice_settings.stability, 0.5);
        assert_eq!(config.voice_settings.similarity_boost, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = TtsConfig::from_yaml_str(
            "base_url: http://127.0.0.1:9000/v1\noutput_dir: /tmp/tts\ntimeout_secs: 5\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/tts"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.voice_id, DEFAULT_VOICE_ID);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = TtsConfig::from_yaml_str("base_url: not a url\n").unwrap_err();
        assert_eq!(err.context().unwrap().field_path.as_deref(), Some("base_url"));

        let err = TtsConfig::from_yaml_str("base_url: ftp://example.com\n").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(TtsConfig::from_yaml_str("timeout_secs: 0\n").is_err());
    }
}
