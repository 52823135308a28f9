//! Persistent record store.
//!
//! SQLite-backed store for season records plus CSV interchange.

pub mod csv;
pub mod repository;
pub mod schema;

pub use repository::SeasonRepository;
