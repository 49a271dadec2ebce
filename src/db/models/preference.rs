use serde::{Deserialize, Serialize};

use crate::models::Room;

/// Stored per-user, per-room lighting default. `intent` true means on,
/// `intensity` true means high.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub id: String,
    pub user_id: String,
    pub room: Room,
    pub intent: bool,
    pub intensity: bool,
}

/// Client-facing shape with 0/1 flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSummary {
    pub room: Room,
    pub intent: u8,
    pub intensity: u8,
}

impl From<Preference> for PreferenceSummary {
    fn from(preference: Preference) -> Self {
        Self {
            room: preference.room,
            intent: u8::from(preference.intent),
            intensity: u8::from(preference.intensity),
        }
    }
}
