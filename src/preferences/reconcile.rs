use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{validation::validate_all, PreferenceError, PreferenceInput};
use crate::db::models::Preference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOp {
    Insert,
    Update,
}

/// A store mutation decided by [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedWrite {
    pub op: WriteOp,
    pub preference: Preference,
}

/// Decides, room by room, whether each submitted preference inserts a new
/// row or updates the stored one.
///
/// The whole batch is validated before anything is planned. Duplicate rooms
/// collapse into one write carrying the last submitted values. Stored rooms
/// that are not mentioned produce no write.
pub fn reconcile(
    user_id: &str,
    existing: &[Preference],
    incoming: &[PreferenceInput],
) -> Result<Vec<PlannedWrite>, PreferenceError> {
    let validated = validate_all(incoming)?;
    let mut planned: Vec<PlannedWrite> = Vec::with_capacity(validated.len());

    for pref in validated {
        if let Some(write) = planned.iter_mut().find(|w| w.preference.room == pref.room) {
            write.preference.intent = pref.intent;
            write.preference.intensity = pref.intensity;
            continue;
        }

        let stored = existing
            .iter()
            .find(|p| p.user_id == user_id && p.room == pref.room);
        let (op, id) = match stored {
            Some(row) => (WriteOp::Update, row.id.clone()),
            None => (WriteOp::Insert, Uuid::new_v4().to_string()),
        };

        planned.push(PlannedWrite {
            op,
            preference: Preference {
                id,
                user_id: user_id.to_string(),
                room: pref.room,
                intent: pref.intent,
                intensity: pref.intensity,
            },
        });
    }

    Ok(planned)
}
