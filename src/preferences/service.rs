use super::{reconcile, validation::validate_all, PlannedWrite, PreferenceError, PreferenceInput, WriteOp};
use crate::db::{models::Preference, Database};
use crate::error::Result;
use crate::log_info;

const ENABLE_LOGS: bool = true;

/// Validates `incoming`, checks the user exists and reconciles against the
/// stored rows. Nothing is written.
pub async fn plan_preferences(
    db: &Database,
    user_id: &str,
    incoming: &[PreferenceInput],
) -> Result<Vec<PlannedWrite>> {
    validate_all(incoming)?;

    if !db.user_exists(user_id).await? {
        return Err(PreferenceError::UnknownUser(user_id.to_string()).into());
    }

    let existing = db.load_preferences(user_id).await?;
    Ok(reconcile(user_id, &existing, incoming)?)
}

/// Plans and commits `incoming` in one store transaction, then returns every
/// stored preference of the user.
pub async fn apply_preferences(
    db: &Database,
    user_id: &str,
    incoming: &[PreferenceInput],
) -> Result<Vec<Preference>> {
    let writes = plan_preferences(db, user_id, incoming).await?;

    if !writes.is_empty() {
        let inserts = writes.iter().filter(|w| w.op == WriteOp::Insert).count();
        log_info!(
            "Applying {} preference writes for user {} ({} new)",
            writes.len(),
            user_id,
            inserts
        );
        db.apply_preference_writes(writes).await?;
    }

    Ok(db.load_preferences(user_id).await?)
}
