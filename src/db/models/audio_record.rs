use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRecord {
    pub id: String,
    pub user_id: String,
    pub file_path: String,
    pub transcribed_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One entry of a user's conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationLog {
    pub user_id: String,
    pub transcribed_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AudioRecord> for ConversationLog {
    fn from(record: AudioRecord) -> Self {
        Self {
            user_id: record.user_id,
            transcribed_text: record.transcribed_text,
            created_at: record.created_at,
        }
    }
}
