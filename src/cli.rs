//! Command-line front end over the request commands.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    accounts::{
        commands as accounts, ImageUpload, LoginRequest, ProfileRequest, RegisterRequest,
    },
    error::HomeError,
    interpreter::interpret,
    preferences::PreferenceInput,
    settings::Settings,
    voice::{commands as voice, AudioUpload},
    AppState,
};

#[derive(Parser, Debug)]
#[command(name = "voicehome", version, about = "Voice-controlled home lighting backend")]
pub struct Cli {
    /// Settings file; falls back to $VOICEHOME_CONFIG, then ./voicehome.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a household and its owner
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        house_address: Option<String>,
        /// JSON list, e.g. '[{"room":"kitchen","intent":1,"intensity":0}]'
        #[arg(long)]
        preferences: Option<String>,
    },
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Add a resident to a household
    AddProfile {
        #[arg(long)]
        admin_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        preferences: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    EditProfile {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        preferences: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Merge a preference list into a user's stored preferences
    SetPreferences {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        preferences: String,
    },
    /// List the members of a household
    Users {
        #[arg(long)]
        admin_id: String,
    },
    UserDetails {
        #[arg(long)]
        user_id: String,
    },
    /// Transcribe an audio file and interpret it as a light command
    Transcribe {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Recent transcripts of a user
    Logs {
        #[arg(long)]
        user_id: String,
    },
    /// Interpret text without touching the store
    Interpret { text: String },
    /// Write a settings file filled with defaults
    InitConfig {
        #[arg(long)]
        force: bool,
    },
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = Settings::resolve_path(cli.config);

    match cli.command {
        Commands::Interpret { text } => print_json(&interpret(&text)),
        Commands::InitConfig { force } => init_config(&config_path, force),
        command => {
            let settings = Settings::load(&config_path)?;
            let state = AppState::from_settings(settings)?;
            run_request(&state, command).await
        }
    }
}

async fn run_request(state: &AppState, command: Commands) -> Result<()> {
    match command {
        Commands::Register {
            name,
            username,
            password,
            house_address,
            preferences,
        } => {
            let request = RegisterRequest {
                name,
                username,
                password,
                house_address,
                preferences: parse_preferences(preferences.as_deref())?,
            };
            print_json(&accounts::register(state, request).await.map_err(report)?)
        }
        Commands::Login { username, password } => {
            let request = LoginRequest { username, password };
            print_json(&accounts::login(state, request).await.map_err(report)?)
        }
        Commands::AddProfile {
            admin_id,
            name,
            preferences,
            image,
        } => {
            let request = profile_request(name, preferences, image).await?;
            let profile = accounts::add_profile(state, &admin_id, request)
                .await
                .map_err(report)?;
            print_json(&profile)
        }
        Commands::EditProfile {
            user_id,
            name,
            preferences,
            image,
        } => {
            let request = profile_request(name, preferences, image).await?;
            let profile = accounts::edit_profile(state, &user_id, request)
                .await
                .map_err(report)?;
            print_json(&profile)
        }
        Commands::SetPreferences {
            user_id,
            preferences,
        } => {
            let preferences = parse_preferences(Some(&preferences))?;
            let stored = accounts::update_preferences(state, &user_id, preferences)
                .await
                .map_err(report)?;
            print_json(&stored)
        }
        Commands::Users { admin_id } => {
            print_json(&accounts::list_users(state, &admin_id).await.map_err(report)?)
        }
        Commands::UserDetails { user_id } => {
            print_json(&accounts::user_details(state, &user_id).await.map_err(report)?)
        }
        Commands::Transcribe { user_id, file } => {
            let (filename, bytes) = read_upload(&file).await?;
            let upload = AudioUpload { filename, bytes };
            let command = voice::transcribe_audio(state, &user_id, upload)
                .await
                .map_err(report)?;
            print_json(&command)
        }
        Commands::Logs { user_id } => {
            print_json(&voice::conversation_logs(state, &user_id).await.map_err(report)?)
        }
        Commands::Interpret { .. } | Commands::InitConfig { .. } => {
            Err(anyhow!("command does not need the store"))
        }
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        ));
    }
    Settings::default().persist(path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

async fn profile_request(
    name: String,
    preferences: Option<String>,
    image: Option<PathBuf>,
) -> Result<ProfileRequest> {
    let image = match image {
        Some(path) => {
            let (filename, bytes) = read_upload(&path).await?;
            Some(ImageUpload { filename, bytes })
        }
        None => None,
    };
    Ok(ProfileRequest {
        name,
        preferences: parse_preferences(preferences.as_deref())?,
        image,
    })
}

fn parse_preferences(raw: Option<&str>) -> Result<Vec<PreferenceInput>> {
    match raw {
        Some(json) => serde_json::from_str(json).context("preferences must be a JSON list"),
        None => Ok(Vec::new()),
    }
}

async fn read_upload(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((filename, bytes))
}

fn report(err: HomeError) -> anyhow::Error {
    anyhow!("[{}] {}", err.status_code(), err)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
