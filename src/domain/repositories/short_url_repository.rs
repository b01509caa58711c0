//! Repository trait for short URL storage.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence port used by the shortening and redirect services.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteShortUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its exact code, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, StorageError>;

    /// Finds a record for exactly this URL that is still active at `now`.
    ///
    /// Matching is plain string equality. When several active records exist the
    /// most recently created one is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on database errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortUrl>, StorageError>;

    /// Inserts a record, relying on the storage uniqueness guarantee for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Conflict`] if the code is already taken.
    /// Returns [`StorageError::Database`] on other database errors.
    async fn insert_if_unique(&self, new_url: NewShortUrl) -> Result<ShortUrl, StorageError>;

    /// Atomically adds one to the click counter.
    ///
    /// Returns `Ok(false)` if no record has this code.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<bool, StorageError>;

    /// Round-trips to the storage backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the backend is unreachable.
    async fn ping(&self) -> Result<(), StorageError>;
}
