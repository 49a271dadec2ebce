use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::{
    db::models::{Admin, AdminSession, PreferenceSummary, Role, User, UserProfile},
    error::{parse_id, require, HomeError, Result},
    files::sanitize_filename,
    preferences::{apply_preferences, plan_preferences, reconcile, PreferenceInput},
    AppState,
};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub house_address: Option<String>,
    #[serde(default)]
    pub preferences: Vec<PreferenceInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Body of add-profile and edit-profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileRequest {
    pub name: String,
    pub preferences: Vec<PreferenceInput>,
    pub image: Option<ImageUpload>,
}

/// Creates a household admin plus its `owner` user carrying the submitted
/// preferences.
pub async fn register(state: &AppState, request: RegisterRequest) -> Result<AdminSession> {
    let name = require("name", &request.name)?;
    let username = require("username", &request.username)?;
    if request.password.is_empty() {
        return Err(HomeError::InvalidInput("password is required".into()));
    }

    let now = Utc::now();
    let owner = User {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
        admin_id: Uuid::new_v4().to_string(),
        image_path: None,
        role: Role::Owner,
        created_at: now,
    };
    let writes = reconcile(&owner.id, &[], &request.preferences)?;

    let admin = Admin {
        id: owner.admin_id.clone(),
        name,
        username: username.clone(),
        password_hash: hash_password(&request.password),
        house_address: request
            .house_address
            .map(|address| address.trim().to_string())
            .filter(|address| !address.is_empty()),
        created_at: now,
    };
    let session = AdminSession::from(admin.clone());

    if !state.db.create_household(admin, owner, writes).await? {
        log_warn!("Registration rejected: username {} already exists", username);
        return Err(HomeError::UsernameTaken(username));
    }

    log_info!("Registered household {} for {}", session.admin_id, username);
    Ok(session)
}

pub async fn login(state: &AppState, request: LoginRequest) -> Result<AdminSession> {
    let username = require("username", &request.username)?;
    if request.password.is_empty() {
        return Err(HomeError::InvalidInput("password is required".into()));
    }

    match state.db.find_admin_by_username(&username).await? {
        Some(admin) if verify_password(&request.password, &admin.password_hash) => {
            Ok(AdminSession::from(admin))
        }
        _ => Err(HomeError::InvalidCredentials),
    }
}

/// Adds a `resident` to an existing household.
pub async fn add_profile(
    state: &AppState,
    admin_id: &str,
    request: ProfileRequest,
) -> Result<UserProfile> {
    let admin_id = parse_id("admin", admin_id)?;
    let name = require("name", &request.name)?;

    if !state.db.admin_exists(&admin_id).await? {
        return Err(HomeError::NotFound("Admin"));
    }

    let user_id = Uuid::new_v4().to_string();
    let writes = reconcile(&user_id, &[], &request.preferences)?;

    let image_path = match &request.image {
        Some(image) => Some(save_image(state, image).await?),
        None => None,
    };

    let user = User {
        id: user_id,
        name,
        admin_id,
        image_path,
        role: Role::Resident,
        created_at: Utc::now(),
    };
    let preferences = writes.iter().map(|w| w.preference.clone()).collect();
    state
        .db
        .insert_user_with_preferences(user.clone(), writes)
        .await?;

    log_info!("Added resident {} to household {}", user.id, user.admin_id);
    Ok(UserProfile::new(user, preferences))
}

/// Renames a user, replaces their picture when one is uploaded and merges
/// the submitted preferences into the stored ones.
pub async fn edit_profile(
    state: &AppState,
    user_id: &str,
    request: ProfileRequest,
) -> Result<UserProfile> {
    let user_id = parse_id("user", user_id)?;
    let name = require("name", &request.name)?;

    if state.db.get_user(&user_id).await?.is_none() {
        return Err(HomeError::NotFound("User"));
    }

    // Plan first so a bad preference list leaves the profile untouched.
    let writes = plan_preferences(&state.db, &user_id, &request.preferences).await?;

    let image_path = match &request.image {
        Some(image) => Some(save_image(state, image).await?),
        None => None,
    };

    if !state
        .db
        .update_user_profile(&user_id, name, image_path, writes)
        .await?
    {
        return Err(HomeError::NotFound("User"));
    }

    load_profile(state, &user_id).await
}

/// Merges a preference list into a user's stored preferences.
pub async fn update_preferences(
    state: &AppState,
    user_id: &str,
    preferences: Vec<PreferenceInput>,
) -> Result<Vec<PreferenceSummary>> {
    let user_id = parse_id("user", user_id)?;
    let stored = apply_preferences(&state.db, &user_id, &preferences).await?;
    Ok(stored.into_iter().map(PreferenceSummary::from).collect())
}

/// Members of a household, owner first then alphabetical.
pub async fn list_users(state: &AppState, admin_id: &str) -> Result<Vec<User>> {
    let admin_id = parse_id("admin", admin_id)?;
    Ok(state.db.list_users_for_admin(&admin_id).await?)
}

pub async fn user_details(state: &AppState, user_id: &str) -> Result<UserProfile> {
    let user_id = parse_id("user", user_id)?;
    load_profile(state, &user_id).await
}

async fn load_profile(state: &AppState, user_id: &str) -> Result<UserProfile> {
    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or(HomeError::NotFound("User"))?;
    let preferences = state.db.load_preferences(user_id).await?;
    Ok(UserProfile::new(user, preferences))
}

async fn save_image(state: &AppState, image: &ImageUpload) -> Result<String> {
    if sanitize_filename(&image.filename).is_none() {
        return Err(HomeError::InvalidInput("Image file name is empty".into()));
    }
    let path = state.files.save_image(&image.filename, &image.bytes).await?;
    Ok(path.to_string_lossy().into_owned())
}
