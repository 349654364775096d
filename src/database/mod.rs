pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryNoteStore;
pub use models::{NewNote, Note, NoteView};
pub use postgres::PgNoteStore;
pub use store::{NoteStore, StoreError};

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{DatabaseConfig, StoreBackend};

/// Build the configured store. Called once at process start.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn NoteStore>, StoreError> {
    match config.backend {
        StoreBackend::Postgres => {
            let store = PgNoteStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            if config.url.is_some() {
                warn!("DATABASE_URL is set but the memory backend is selected; notes will not be persisted");
            }
            info!("Using in-memory note store");
            Ok(Arc::new(MemoryNoteStore::new()))
        }
    }
}
