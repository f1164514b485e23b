//! Mock ElevenLabs server setup for integration tests

#![allow(dead_code)]

use elevenlabs_tts::TtsClient;
use mockito::{Mock, Server, ServerGuard};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const API_KEY: &str = "fake_api_key";
pub const DEFAULT_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

/// Mock server plus a scratch output directory that disappears with the fixture.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
    tmp: TempDir,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = format!("{}/v1", server.url());
        Self {
            server,
            base_url,
            tmp: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Output directory the client writes into. Not created until the first write.
    pub fn output_dir(&self) -> PathBuf {
        self.tmp.path().join("audio_output")
    }

    pub fn client(&self) -> TtsClient {
        self.client_with_timeout(30)
    }

    pub fn client_with_timeout(&self, secs: u64) -> TtsClient {
        TtsClient::builder()
            .api_key(API_KEY)
            .base_url(&self.base_url)
            .output_dir(self.output_dir())
            .timeout_secs(secs)
            .build()
            .expect("build client")
    }

    /// Files currently present in the output directory.
    pub fn written_files(&self) -> Vec<PathBuf> {
        list_files(&self.output_dir())
    }

    pub async fn mock_synthesis(&mut self, voice_id: &str, status: usize, body: &[u8]) -> Mock {
        let content_type = if (200..300).contains(&status) {
            "audio/mpeg"
        } else {
            "application/json"
        };
        self.server
            .mock("POST", format!("/v1/text-to-speech/{}", voice_id).as_str())
            .match_header("xi-api-key", API_KEY)
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await
    }

    pub async fn mock_voices(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", "/v1/voices")
            .match_header("xi-api-key", API_KEY)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

fn list_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}
