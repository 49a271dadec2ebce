use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Room;

pub const FALLBACK_RESPONSE: &str = "Please enter valid instructions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    On,
    Off,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::On => "on",
            Intent::Off => "off",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::High => "high",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured light command derived from one transcript.
///
/// Serializes with the `text` / `response` keys clients already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub room: Option<Room>,
    pub intent: Option<Intent>,
    pub intensity: Option<Intensity>,
    #[serde(rename = "text")]
    pub original_text: String,
    #[serde(rename = "response")]
    pub response_message: String,
}

impl Command {
    pub fn fallback(transcript: &str) -> Self {
        Self {
            room: None,
            intent: None,
            intensity: None,
            original_text: transcript.to_string(),
            response_message: FALLBACK_RESPONSE.to_string(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.room.is_some()
    }
}
