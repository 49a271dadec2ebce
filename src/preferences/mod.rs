//! Room preference reconciliation.
//!
//! `reconcile` is pure: it turns a submitted list into planned inserts and
//! updates. `service` wires it to the store.

pub mod area;
pub mod reconcile;
pub mod service;
pub mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use area::{normalize_room, AreaInput};
pub use reconcile::{reconcile, PlannedWrite, WriteOp};
pub use service::{apply_preferences, plan_preferences};

/// One entry of a submitted preference list, as sent by clients.
///
/// The flags stay raw JSON until validation so that a missing or mistyped
/// flag is reported against its room and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceInput {
    pub room: AreaInput,
    #[serde(default)]
    pub intent: Option<Value>,
    #[serde(default)]
    pub intensity: Option<Value>,
}

impl PreferenceInput {
    pub fn new(room: impl Into<AreaInput>, intent: i64, intensity: i64) -> Self {
        Self {
            room: room.into(),
            intent: Some(Value::from(intent)),
            intensity: Some(Value::from(intensity)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceField {
    Room,
    Intent,
    Intensity,
}

impl fmt::Display for PreferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreferenceField::Room => "room",
            PreferenceField::Intent => "intent",
            PreferenceField::Intensity => "intensity",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Invalid {field} in preferences for room '{room}': {value}")]
    InvalidPreference {
        room: String,
        field: PreferenceField,
        value: String,
    },

    #[error("Unknown user: {0}")]
    UnknownUser(String),
}
