//! Upload storage on the local filesystem.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

#[derive(Debug, Clone)]
pub struct FileStore {
    audio_dir: PathBuf,
    image_dir: PathBuf,
}

impl FileStore {
    pub fn new(audio_dir: PathBuf, image_dir: PathBuf) -> Self {
        Self {
            audio_dir,
            image_dir,
        }
    }

    /// Writes an audio clip to `<audio_dir>/<user_id>/<filename>`.
    pub async fn save_audio(&self, user_id: &str, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.audio_dir.join(user_id);
        write_upload(&dir, filename, bytes).await
    }

    pub async fn save_image(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        write_upload(&self.image_dir, filename, bytes).await
    }
}

async fn write_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let name = sanitize_filename(filename)
        .ok_or_else(|| anyhow!("invalid upload file name {filename:?}"))?;

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create upload directory {}", dir.display()))?;

    let path = dir.join(name);
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("failed to write upload {}", path.display()))?;

    Ok(path)
}

/// Keeps only the final component of a client-supplied name, whichever
/// separator the client used.
pub fn sanitize_filename(filename: &str) -> Option<&str> {
    let name = filename.rsplit(|c: char| c == '/' || c == '\\').next()?.trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}
