use std::sync::Arc;

use crate::auth::Claims;
use crate::database::{NewNote, NoteStore, NoteView, StoreError};

/// Query and append logic for a user's notebook. Holds no state of its own.
#[derive(Clone)]
pub struct NotesService {
    store: Arc<dyn NoteStore>,
}

impl NotesService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// All notes owned by `subject_id`, most recent first.
    ///
    /// `subject_id` must come from verified claims, never from request data.
    pub async fn list_notes(&self, subject_id: &str) -> Result<Vec<NoteView>, StoreError> {
        let notes = self.store.query(subject_id).await?;
        Ok(notes.into_iter().map(NoteView::from).collect())
    }

    /// Append a note to the caller's notebook.
    ///
    /// Not idempotent: a client retry after a timeout stores a second note.
    pub async fn add_note(&self, claims: &Claims, message: String) -> Result<NoteView, StoreError> {
        let note = NewNote {
            owner_id: claims.sub.clone(),
            friendly_id: friendly_id(claims),
            message,
            created: None,
        };

        let stored = self.store.put(note).await?;
        tracing::debug!("Stored note {} for {}", stored.id, stored.owner_id);
        Ok(stored.into())
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

/// Display name for a note's author: `name` when present, else `email`.
/// Some identity providers only supply one of the two.
pub fn friendly_id(claims: &Claims) -> Option<String> {
    claims.name.clone().or_else(|| claims.email.clone())
}
