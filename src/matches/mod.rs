// Public API - what other modules can use
pub use handlers::{
    clear_matches, delete_match, get_current_spymasters, get_history, record_match,
};
pub use models::{MatchRecord, NewMatch, Side, SortOrder};
pub use repository::{InMemoryMatchRepository, MatchRepository, SqliteMatchRepository};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
