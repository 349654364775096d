pub mod notes_service;

pub use notes_service::{friendly_id, NotesService};
