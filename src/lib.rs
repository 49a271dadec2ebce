pub mod accounts;
mod cli;
pub mod db;
pub mod error;
pub mod files;
pub mod interpreter;
pub mod models;
pub mod preferences;
pub mod settings;
pub mod stt;
pub mod utils;
pub mod voice;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use db::Database;
use files::FileStore;
use settings::Settings;
use stt::{create_transcriber, Transcriber};

/// Everything a request handler needs. Cloning shares the same database
/// worker and transcriber.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub transcriber: Arc<dyn Transcriber>,
    pub files: FileStore,
    pub settings: Settings,
}

impl AppState {
    /// Opens the store described by `settings` and uses the configured
    /// speech-to-text backend.
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let transcriber: Arc<dyn Transcriber> = Arc::from(create_transcriber(&settings.stt));
        Self::with_transcriber(settings, transcriber)
    }

    pub fn with_transcriber(
        settings: Settings,
        transcriber: Arc<dyn Transcriber>,
    ) -> anyhow::Result<Self> {
        let db = Database::new(settings.database_path.clone())?;
        let files = FileStore::new(settings.audio_dir.clone(), settings.image_dir.clone());
        Ok(Self {
            db,
            transcriber,
            files,
            settings,
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    utils::logging::init();

    let args = cli::Cli::parse();
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(cli::dispatch(args))
}
