#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use voicehome_lib::{
    accounts::{commands, RegisterRequest},
    db::models::AdminSession,
    preferences::PreferenceInput,
    settings::Settings,
    stt::{Transcriber, TranscriptionError},
    AppState,
};

/// Returns queued replies in order, then repeats the last one.
pub struct FakeTranscriber {
    replies: Mutex<Vec<Result<String, TranscriptionError>>>,
    filenames: Mutex<Vec<String>>,
}

impl FakeTranscriber {
    pub fn saying(texts: &[&str]) -> Self {
        Self {
            replies: Mutex::new(texts.iter().rev().map(|t| Ok(t.to_string())).collect()),
            filenames: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: TranscriptionError) -> Self {
        Self {
            replies: Mutex::new(vec![Err(err)]),
            filenames: Mutex::new(Vec::new()),
        }
    }

    /// File names passed to `transcribe`, oldest first.
    pub fn filenames(&self) -> Vec<String> {
        self.filenames.lock().unwrap().clone()
    }
}

impl Transcriber for FakeTranscriber {
    fn transcribe(&self, _audio: &[u8], filename: &str) -> Result<String, TranscriptionError> {
        self.filenames.lock().unwrap().push(filename.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop().unwrap()
        } else {
            replies.last().cloned().unwrap()
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        database_path: dir.path().join("db").join("voicehome.sqlite3"),
        audio_dir: dir.path().join("audio"),
        image_dir: dir.path().join("images"),
        ..Settings::default()
    }
}

pub fn state_with(dir: &TempDir, transcriber: FakeTranscriber) -> AppState {
    state_sharing(dir, Arc::new(transcriber))
}

pub fn state_sharing(dir: &TempDir, transcriber: Arc<FakeTranscriber>) -> AppState {
    AppState::with_transcriber(settings_in(dir), transcriber).unwrap()
}

pub fn state(dir: &TempDir) -> AppState {
    state_with(dir, FakeTranscriber::saying(&[""]))
}

pub fn pref(room: &str, intent: i64, intensity: i64) -> PreferenceInput {
    PreferenceInput::new(room, intent, intensity)
}

pub fn register_request(username: &str, preferences: Vec<PreferenceInput>) -> RegisterRequest {
    RegisterRequest {
        name: "Ada".into(),
        username: username.into(),
        password: "secret".into(),
        house_address: Some("1 Lamp Lane".into()),
        preferences,
    }
}

pub async fn register(state: &AppState, username: &str) -> AdminSession {
    commands::register(state, register_request(username, Vec::new()))
        .await
        .unwrap()
}
