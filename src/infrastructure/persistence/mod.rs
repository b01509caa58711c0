//! SQLite persistence.
//!
//! - [`SqliteShortUrlRepository`] - Short URL storage and click counting
//! - [`pool`] - Pool construction and migrations

pub mod pool;
pub mod sqlite_short_url_repository;

pub use pool::{PoolSettings, connect, connect_in_memory, migrate};
pub use sqlite_short_url_repository::SqliteShortUrlRepository;
