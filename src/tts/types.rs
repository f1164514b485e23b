//! TTS (Text-to-Speech) types.

use crate::error::{Error, ErrorKind, RemoteErrorClass};
use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Voice tuning sent with every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

/// One synthesis call. Unset voice/model fall back to the client's configured defaults.
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
    /// Output file name inside the store; generated when `None`.
    pub filename: Option<String>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Wire body of `POST /text-to-speech/{voice_id}`.
#[derive(Debug, Serialize)]
pub(crate) struct SynthesisPayload<'a> {
    pub text: &'a str,
    pub model_id: &'a str,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisMetadata {
    pub text: String,
    pub voice_id: String,
    pub model_id: String,
    /// `Content-Type` reported by the service.
    pub content_type: Option<String>,
    pub content_length: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisSuccess {
    #[serde(skip)]
    pub audio: Bytes,
    pub audio_path: PathBuf,
    pub metadata: SynthesisMetadata,
}

/// Why a call failed, with whatever the service sent back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_class: Option<RemoteErrorClass>,
    /// Raw response body of a non-2xx answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        let error_class = match &err {
            Error::Remote { class, .. } => Some(*class),
            _ => None,
        };
        Self {
            kind: err.kind(),
            status_code: err.status_code(),
            details: err.response_body().map(str::to_string),
            error_class,
            error: err.to_string(),
        }
    }
}

/// Outcome of a synthesis call. Serializes to `{"success": bool, ...}`.
#[derive(Debug, Clone)]
pub enum SynthesisResult {
    Success(SynthesisSuccess),
    Failure(Failure),
}

impl SynthesisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(&self) -> Option<&SynthesisSuccess> {
        match self {
            Self::Success(s) => Some(s),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f),
        }
    }
}

impl From<Error> for SynthesisResult {
    fn from(err: Error) -> Self {
        Self::Failure(err.into())
    }
}

impl Serialize for SynthesisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(s) => Tagged::new(true, s).serialize(serializer),
            Self::Failure(f) => Tagged::new(false, f).serialize(serializer),
        }
    }
}

/// A voice descriptor as listed by the service. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Voice {
    /// Decode one list entry. When an entry does not fit the typed fields, `voice_id`
    /// and `name` are salvaged and everything else lands in `extra` (a non-object
    /// entry under `"value"`).
    pub fn from_json(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Voice>(value.clone()) {
            Ok(voice) => voice,
            Err(_) => {
                let mut extra = match value {
                    serde_json::Value::Object(map) => map,
                    other => {
                        let mut map = serde_json::Map::new();
                        map.insert("value".to_string(), other);
                        map
                    }
                };
                let mut take_string = |key: &str| match extra.remove(key) {
                    Some(serde_json::Value::String(s)) => s,
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                let voice_id = take_string("voice_id");
                let name = take_string("name");
                Self {
                    voice_id,
                    name,
                    category: None,
                    description: None,
                    preview_url: None,
                    labels: None,
                    extra,
                }
            }
        }
    }
}

/// The service wraps the list in `{"voices": [...]}`; a bare array is accepted too.
/// Entries are decoded one by one so a single odd entry never fails the listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum VoiceListBody {
    Bare(Vec<serde_json::Value>),
    Envelope { voices: Vec<serde_json::Value> },
}

impl VoiceListBody {
    pub fn into_voices(self) -> Vec<Voice> {
        match self {
            Self::Bare(entries) | Self::Envelope { voices: entries } => {
                entries.into_iter().map(Voice::from_json).collect()
            }
        }
    }
}

/// Outcome of a voice listing. Serializes to `{"success": bool, ...}`.
#[derive(Debug, Clone)]
pub enum VoiceCatalog {
    Success { voices: Vec<Voice> },
    Failure(Failure),
}

impl VoiceCatalog {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn voices(&self) -> Option<&[Voice]> {
        match self {
            Self::Success { voices } => Some(voices),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(f) => Some(f),
        }
    }
}

impl From<Error> for VoiceCatalog {
    fn from(err: Error) -> Self {
        Self::Failure(err.into())
    }
}

impl Serialize for VoiceCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Voices<'a> {
            voices: &'a [Voice],
        }

        match self {
            Self::Success { voices } => Tagged::new(true, &Voices { voices }).serialize(serializer),
            Self::Failure(f) => Tagged::new(false, f).serialize(serializer),
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    inner: &'a T,
}

impl<'a, T: Serialize> Tagged<'a, T> {
    fn new(success: bool, inner: &'a T) -> Self {
        Self { success, inner }
    }
}
