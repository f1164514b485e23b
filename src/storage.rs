//! Audio persistence under a single output directory.

use crate::{Error, ErrorContext, Result};
use std::path::{Component, Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Writes synthesized audio into `output_dir`, creating it on demand.
#[derive(Debug, Clone)]
pub struct AudioStore {
    output_dir: PathBuf,
}

impl AudioStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate a fresh `audio_<uuid>.mp3` name.
    pub fn unique_filename() -> String {
        format!("audio_{}.mp3", Uuid::new_v4())
    }

    /// Resolve `filename` inside the output directory.
    ///
    /// The name must be a single plain path component; separators, `..` and
    /// absolute paths are rejected.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        let candidate = Path::new(filename);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.output_dir.join(candidate)),
            _ => Err(Error::validation_with_context(
                "filename must be a plain file name without directories",
                ErrorContext::new()
                    .with_field_path("filename")
                    .with_details(filename.to_string())
                    .with_source("storage"),
            )),
        }
    }

    /// Write `audio` to `filename` (or a generated unique name) and return the path written.
    pub async fn persist(&self, audio: &[u8], filename: Option<&str>) -> Result<PathBuf> {
        let path = match filename {
            Some(name) => self.path_for(name)?,
            None => self.path_for(&Self::unique_filename())?,
        };
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, audio).await?;
        info!(path = %path.display(), bytes = audio.len(), "audio saved");
        Ok(path)
    }
}
