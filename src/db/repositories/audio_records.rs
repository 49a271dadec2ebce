use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime},
    models::AudioRecord,
};

fn row_to_audio_record(row: &Row) -> Result<AudioRecord> {
    let created_at: String = row.get("created_at")?;

    Ok(AudioRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        file_path: row.get("file_path")?,
        transcribed_text: row.get("transcribed_text")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Record an uploaded clip and what was heard in it
    pub async fn store_transcript(
        &self,
        user_id: &str,
        audio_ref: &str,
        text: &str,
    ) -> Result<AudioRecord> {
        let record = AudioRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            file_path: audio_ref.to_string(),
            transcribed_text: Some(text.to_string()),
            created_at: Utc::now(),
        };

        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO audio_records (id, user_id, file_path, transcribed_text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.user_id,
                    record.file_path,
                    record.transcribed_text,
                    format_datetime(&record.created_at),
                ],
            )
            .with_context(|| "failed to insert audio record")?;
            Ok(record)
        })
        .await
    }

    /// Newest first
    pub async fn recent_transcripts(&self, user_id: &str, limit: u32) -> Result<Vec<AudioRecord>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, file_path, transcribed_text, created_at
                 FROM audio_records
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2",
            )?;

            let mut rows = stmt.query(params![user_id, limit])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(row_to_audio_record(row)?);
            }

            Ok(records)
        })
        .await
    }
}
