use serde_json::Value;

use super::{PreferenceError, PreferenceField, PreferenceInput};
use crate::models::Room;

/// A submitted preference after alias mapping and range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidPreference {
    pub room: Room,
    pub intent: bool,
    pub intensity: bool,
}

pub fn validate_preference(input: &PreferenceInput) -> Result<ValidPreference, PreferenceError> {
    let name = input.room.normalized();
    let room = Room::parse(&name).ok_or_else(|| PreferenceError::InvalidPreference {
        room: name.clone(),
        field: PreferenceField::Room,
        value: name.clone(),
    })?;

    Ok(ValidPreference {
        room,
        intent: to_flag(input.intent.as_ref(), room, PreferenceField::Intent)?,
        intensity: to_flag(input.intensity.as_ref(), room, PreferenceField::Intensity)?,
    })
}

/// Validates every entry; the first failure aborts the whole batch.
pub fn validate_all(inputs: &[PreferenceInput]) -> Result<Vec<ValidPreference>, PreferenceError> {
    inputs.iter().map(validate_preference).collect()
}

/// Accepts 0/1 as integers, integral floats or booleans. Anything else,
/// including an absent flag, is invalid.
fn to_flag(value: Option<&Value>, room: Room, field: PreferenceField) -> Result<bool, PreferenceError> {
    let flag = match value {
        Some(Value::Bool(flag)) => Some(*flag),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(n) if n == 0.0 => Some(false),
            Some(n) if n == 1.0 => Some(true),
            _ => None,
        },
        _ => None,
    };

    flag.ok_or_else(|| PreferenceError::InvalidPreference {
        room: room.as_str().to_string(),
        field,
        value: value.map_or_else(|| "missing".to_string(), Value::to_string),
    })
}
