use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted note. `owner_id` is the partition key and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub owner_id: String,
    pub friendly_id: Option<String>,
    pub message: String,
    pub created: DateTime<Utc>,
}

/// Write model handed to `NoteStore::put`; the store assigns `created` when unset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub owner_id: String,
    pub friendly_id: Option<String>,
    pub message: String,
    pub created: Option<DateTime<Utc>>,
}

/// Client-facing projection of a note. The owner is implicit from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteView {
    pub friendly_id: Option<String>,
    pub message: String,
    pub created: DateTime<Utc>,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            friendly_id: note.friendly_id,
            message: note.message,
            created: note.created,
        }
    }
}
