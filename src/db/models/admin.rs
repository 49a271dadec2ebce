//! Household account data models.
//!
//! An admin owns one household; the password is only ever stored hashed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub house_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What a successful registration or login hands back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub admin_id: String,
    pub name: String,
}

impl From<Admin> for AdminSession {
    fn from(admin: Admin) -> Self {
        Self {
            admin_id: admin.id,
            name: admin.name,
        }
    }
}
