use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const CONFIG_ENV_VAR: &str = "VOICEHOME_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "voicehome.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SttSettings {
    /// Base URL of an OpenAI-compatible transcription server. Empty disables
    /// transcription.
    #[serde(default = "default_stt_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_stt_model")]
    pub model: String,
    #[serde(default = "default_stt_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SttSettings {
    fn default() -> Self {
        Self {
            endpoint: default_stt_endpoint(),
            model: default_stt_model(),
            timeout_secs: default_stt_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    #[serde(default = "default_conversation_log_limit")]
    pub conversation_log_limit: u32,
    #[serde(default)]
    pub stt: SttSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            audio_dir: default_audio_dir(),
            image_dir: default_image_dir(),
            conversation_log_limit: default_conversation_log_limit(),
            stt: SttSettings::default(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file means defaults; a file that
    /// exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    /// `explicit`, else `$VOICEHOME_CONFIG`, else `voicehome.json`.
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/voicehome.sqlite3")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("uploads/audio")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("uploads/images")
}

fn default_conversation_log_limit() -> u32 {
    10
}

fn default_stt_endpoint() -> String {
    "http://127.0.0.1:8080".into()
}

fn default_stt_model() -> String {
    "whisper-medium".into()
}

fn default_stt_timeout_secs() -> u64 {
    120
}
