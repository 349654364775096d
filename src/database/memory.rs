use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::database::models::{NewNote, Note};
use crate::database::store::{NoteStore, StoreError};

/// Process-local store keyed by owner. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryNoteStore {
    partitions: RwLock<HashMap<String, Vec<Note>>>,
    next_id: AtomicI64,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of notes across all partitions
    pub async fn len(&self) -> usize {
        self.partitions.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn put(&self, note: NewNote) -> Result<Note, StoreError> {
        let stored = Note {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            owner_id: note.owner_id,
            friendly_id: note.friendly_id,
            message: note.message,
            created: note.created.unwrap_or_else(Utc::now),
        };

        let mut partitions = self.partitions.write().await;
        partitions
            .entry(stored.owner_id.clone())
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        let partitions = self.partitions.read().await;
        let mut notes = partitions.get(owner_id).cloned().unwrap_or_default();
        notes.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
