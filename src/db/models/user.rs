//! Resident data models.
//!
//! - `User`, `Role`: one row per household member
//! - `UserProfile`: a user joined with their stored room preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Preference, PreferenceSummary};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Resident,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Resident => "resident",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    pub image_path: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub admin_id: String,
    pub image_path: Option<String>,
    pub preferences: Vec<PreferenceSummary>,
}

impl UserProfile {
    pub fn new(user: User, preferences: Vec<Preference>) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            role: user.role,
            admin_id: user.admin_id,
            image_path: user.image_path,
            preferences: preferences.into_iter().map(PreferenceSummary::from).collect(),
        }
    }
}
