//! # elevenlabs-tts
//!
//! Client wrapper for the ElevenLabs text-to-speech API.
//!
//! ## Overview
//!
//! [`TtsClient`] turns a `(text, voice, model)` tuple into one HTTP request,
//! writes the returned audio into an output directory and hands back a
//! [`SynthesisResult`]. Voice listing works the same way through
//! [`VoiceCatalog`]. Neither call returns `Err`: transport failures, non-2xx
//! answers and filesystem errors all come back as the `Failure` arm, carrying
//! the status code and response body when the service answered.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elevenlabs_tts::{SynthesisResult, TtsClient};
//!
//! #[tokio::main]
//! async fn main() -> elevenlabs_tts::Result<()> {
//!     let client = TtsClient::new("your-api-key")?;
//!
//!     match client.synthesize("Hello, this is a test of the ElevenLabs API!").await {
//!         SynthesisResult::Success(ok) => println!("saved {}", ok.audio_path.display()),
//!         SynthesisResult::Failure(err) => eprintln!("failed: {}", err.error),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tts`] | Client, request and outcome types |
//! | [`config`] | Defaults, environment and YAML configuration |
//! | [`credential`] | API key handling |
//! | [`storage`] | Audio file persistence |
//! | [`transport`] | Configured HTTP client |
//! | `webhook` | Axum routes exposing the client (feature `webhook`) |

pub mod config;
pub mod credential;
pub mod storage;
pub mod transport;
pub mod tts;

#[cfg(feature = "webhook")]
pub mod webhook;

// Re-export main types for convenience
pub use config::TtsConfig;
pub use credential::ApiKey;
pub use storage::AudioStore;
pub use tts::{
    Failure, SynthesisMetadata, SynthesisRequest, SynthesisResult, SynthesisSuccess, TtsClient,
    TtsClientBuilder, Voice, VoiceCatalog, VoiceSettings,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind, RemoteErrorClass};
