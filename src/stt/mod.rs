//! Speech-to-text: pluggable trait plus the backends this crate ships.

pub mod http;

use thiserror::Error;

use crate::log_warn;
use crate::settings::SttSettings;

pub use http::HttpTranscriber;

const ENABLE_LOGS: bool = true;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("transcription request failed: {0}")]
    Request(String),

    #[error("transcription service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("transcription service sent an unreadable reply: {0}")]
    MalformedResponse(String),

    #[error("transcription backend unavailable: {0}")]
    Unavailable(String),
}

/// A speech-to-text backend. Calls block until text is available.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String, TranscriptionError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

/// Stand-in used when no endpoint is configured. The backend stays up and
/// every transcription attempt reports why it cannot run.
pub struct PendingTranscriber {
    reason: String,
}

impl PendingTranscriber {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Transcriber for PendingTranscriber {
    fn transcribe(&self, _audio: &[u8], _filename: &str) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "pending"
    }
}

pub fn create_transcriber(settings: &SttSettings) -> Box<dyn Transcriber> {
    if settings.endpoint.trim().is_empty() {
        log_warn!("No speech-to-text endpoint configured; transcription is disabled");
        return Box::new(PendingTranscriber::new("no stt.endpoint configured"));
    }
    Box::new(HttpTranscriber::new(settings))
}
