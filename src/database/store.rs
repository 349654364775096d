use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewNote, Note};

/// Errors from a `NoteStore`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistent document store owning all note records.
///
/// Notes are partitioned by `owner_id`. Implementations must return a
/// partition ordered by `created` descending, breaking ties by the newer
/// insert first.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a note in a single write and return the stored record
    async fn put(&self, note: NewNote) -> Result<Note, StoreError>;

    /// All notes owned by `owner_id`, newest first
    async fn query(&self, owner_id: &str) -> Result<Vec<Note>, StoreError>;

    /// Connectivity check used by `/health`
    async fn ping(&self) -> Result<(), StoreError>;
}
