use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::{NewNote, Note};
use crate::database::store::{NoteStore, StoreError};

const CREATE_NOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id          BIGSERIAL PRIMARY KEY,
        owner_id    TEXT NOT NULL,
        friendly_id TEXT,
        message     TEXT NOT NULL,
        created     TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_OWNER_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS notes_owner_created_idx
        ON notes (owner_id, created DESC, id DESC)
"#;

/// PostgreSQL-backed store sharing one connection pool across requests
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool sized by configuration and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;
        let parsed = url::Url::parse(url).map_err(|_| StoreError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Connected to database {}{} (max {} connections)",
            parsed.host_str().unwrap_or("localhost"),
            parsed.path(),
            config.max_connections
        );

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create the notes table and its owner index if missing
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_NOTES_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_OWNER_INDEX).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn put(&self, note: NewNote) -> Result<Note, StoreError> {
        let stored = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (owner_id, friendly_id, message, created)
             VALUES ($1, $2, $3, COALESCE($4, now()))
             RETURNING id, owner_id, friendly_id, message, created",
        )
        .bind(&note.owner_id)
        .bind(&note.friendly_id)
        .bind(&note.message)
        .bind(note.created)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, owner_id, friendly_id, message, created
             FROM notes
             WHERE owner_id = $1
             ORDER BY created DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
