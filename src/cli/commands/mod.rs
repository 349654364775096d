pub mod health;
pub mod notes;
pub mod token;
