use std::sync::Arc;

use anyhow::anyhow;

use crate::{
    db::models::ConversationLog,
    error::{parse_id, HomeError, Result},
    files::sanitize_filename,
    interpreter::{interpret, Command},
    AppState,
};
use crate::{log_debug, log_error, log_info};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Stores the clip, transcribes it and interprets the text. The transcript
/// is recorded whether or not a room was recognized.
pub async fn transcribe_audio(
    state: &AppState,
    user_id: &str,
    upload: AudioUpload,
) -> Result<Command> {
    let user_id = parse_id("user", user_id)?;
    if upload.bytes.is_empty() {
        return Err(HomeError::InvalidInput("No audio file provided".into()));
    }
    let filename = sanitize_filename(&upload.filename)
        .ok_or_else(|| HomeError::InvalidInput("Audio file name is empty".into()))?
        .to_string();
    if !state.db.user_exists(&user_id).await? {
        return Err(HomeError::NotFound("User"));
    }

    let path = state
        .files
        .save_audio(&user_id, &filename, &upload.bytes)
        .await?;

    let transcriber = Arc::clone(&state.transcriber);
    let bytes = upload.bytes;
    let backend = transcriber.name().to_string();
    let text = tokio::task::spawn_blocking(move || transcriber.transcribe(&bytes, &filename))
        .await
        .map_err(|err| anyhow!("transcription task failed: {err}"))?
        .map_err(|err| {
            log_error!("{} transcription failed for user {}: {}", backend, user_id, err);
            err
        })?;
    log_debug!("Transcribed text for user {}: {:?}", user_id, text);

    let command = interpret(&text);
    state
        .db
        .store_transcript(&user_id, &path.to_string_lossy(), &text)
        .await?;

    log_info!(
        "Voice command for user {}: room={:?} intent={:?} intensity={:?}",
        user_id,
        command.room,
        command.intent,
        command.intensity
    );
    Ok(command)
}

/// Most recent transcripts of a user, newest first.
pub async fn conversation_logs(state: &AppState, user_id: &str) -> Result<Vec<ConversationLog>> {
    let user_id = parse_id("user", user_id)?;
    let records = state
        .db
        .recent_transcripts(&user_id, state.settings.conversation_log_limit)
        .await?;
    Ok(records.into_iter().map(ConversationLog::from).collect())
}
