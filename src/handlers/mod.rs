// handlers/mod.rs - HTTP handlers
//
// Public (no auth) → /health
// Protected (verified claims required) → /notes
pub mod health;
pub mod notes;

pub use health::health;
