//! Text-to-speech over the ElevenLabs HTTP API: synthesis, voice listing and audio persistence.

mod client;
mod types;

pub use client::{TtsClient, TtsClientBuilder};
pub use types::{
    Failure, SynthesisMetadata, SynthesisRequest, SynthesisResult, SynthesisSuccess, Voice,
    VoiceCatalog, VoiceSettings,
};
