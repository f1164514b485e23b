//! Basic usage: synthesize one sentence and list voices.
//!
//! Run with: ELEVENLABS_API_KEY=... cargo run --example basic_usage

use elevenlabs_tts::{SynthesisRequest, SynthesisResult, TtsClient, VoiceCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Picks the key up from ELEVENLABS_API_KEY.
    let client = TtsClient::builder().build()?;

    let request = SynthesisRequest::new("Hello, this is a test of the ElevenLabs API!")
        .filename("test_speech.mp3");
    match client.synthesize_with(&request).await {
        SynthesisResult::Success(ok) => println!("Audio saved to: {}", ok.audio_path.display()),
        SynthesisResult::Failure(f) => println!("Synthesis failed: {}", f.error),
    }

    if let VoiceCatalog::Success { voices } = client.list_voices().await {
        for voice in voices.iter().take(5) {
            println!("{} ({})", voice.name, voice.voice_id);
        }
    }
    Ok(())
}
