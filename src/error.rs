//! Errors surfaced by the request-handling commands.

use thiserror::Error;
use uuid::Uuid;

use crate::preferences::PreferenceError;
use crate::stt::TranscriptionError;

#[derive(Error, Debug)]
pub enum HomeError {
    /// A required field is missing or malformed
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid {kind} ID format: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username '{0}' is already registered")]
    UsernameTaken(String),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl HomeError {
    /// HTTP-style status a front end should report for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            HomeError::InvalidInput(_) | HomeError::InvalidId { .. } => 400,
            HomeError::InvalidCredentials => 401,
            HomeError::NotFound(_) => 404,
            HomeError::UsernameTaken(_) => 409,
            HomeError::Preference(PreferenceError::InvalidPreference { .. }) => 400,
            HomeError::Preference(PreferenceError::UnknownUser(_)) => 404,
            HomeError::Transcription(TranscriptionError::Unavailable(_)) => 503,
            HomeError::Transcription(_) => 502,
            HomeError::Storage(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, HomeError>;

/// Parses a client-supplied UUID and returns it in canonical hyphenated
/// lowercase form.
pub fn parse_id(kind: &'static str, value: &str) -> Result<String> {
    Uuid::parse_str(value.trim())
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| HomeError::InvalidId {
            kind,
            value: value.to_string(),
        })
}

/// Trims `value` and rejects it when nothing is left.
pub fn require(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HomeError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
