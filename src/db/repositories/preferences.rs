use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::db::{connection::Database, helpers::parse_room, models::Preference};
use crate::preferences::{PlannedWrite, WriteOp};

fn row_to_preference(row: &Row) -> Result<Preference> {
    let room: String = row.get("room")?;

    Ok(Preference {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        room: parse_room(&room)?,
        intent: row.get("intent")?,
        intensity: row.get("intensity")?,
    })
}

/// Applies one planned write with single-statement atomicity per
/// `(user_id, room)`: an insert that races another insert for the same room
/// turns into an update, and an update whose row has vanished becomes an insert.
pub(super) fn write_preference(conn: &Connection, write: &PlannedWrite) -> Result<()> {
    let pref = &write.preference;

    if write.op == WriteOp::Update {
        let updated = conn
            .execute(
                "UPDATE user_preferences
                 SET intent = ?1,
                     intensity = ?2
                 WHERE user_id = ?3 AND room = ?4",
                params![pref.intent, pref.intensity, pref.user_id, pref.room.as_str()],
            )
            .with_context(|| format!("failed to update preference for room {}", pref.room))?;
        if updated > 0 {
            return Ok(());
        }
    }

    conn.execute(
        "INSERT INTO user_preferences (id, user_id, room, intent, intensity)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id, room) DO UPDATE
         SET intent = excluded.intent,
             intensity = excluded.intensity",
        params![pref.id, pref.user_id, pref.room.as_str(), pref.intent, pref.intensity],
    )
    .with_context(|| format!("failed to insert preference for room {}", pref.room))?;

    Ok(())
}

impl Database {
    /// All stored preferences of a user in kitchen, master, guest, hall order
    pub async fn load_preferences(&self, user_id: &str) -> Result<Vec<Preference>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, room, intent, intensity
                 FROM user_preferences
                 WHERE user_id = ?1
                 ORDER BY CASE room
                     WHEN 'kitchen' THEN 0
                     WHEN 'master' THEN 1
                     WHEN 'guest' THEN 2
                     ELSE 3
                 END",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut preferences = Vec::new();
            while let Some(row) = rows.next()? {
                preferences.push(row_to_preference(row)?);
            }

            Ok(preferences)
        })
        .await
    }

    pub async fn save_preference(&self, write: PlannedWrite) -> Result<()> {
        self.execute(move |conn| write_preference(conn, &write)).await
    }

    /// Commit a reconciled batch; either every write lands or none does.
    pub async fn apply_preference_writes(&self, writes: Vec<PlannedWrite>) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn
                .transaction()
                .context("failed to open preference transaction")?;
            for write in &writes {
                write_preference(&tx, write)?;
            }
            tx.commit().context("failed to commit preferences")?;
            Ok(())
        })
        .await
    }
}
