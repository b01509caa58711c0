//! Error kinds returned by the shortening and redirect operations.

/// Failures reported by a [`ShortUrlRepository`](crate::domain::repositories::ShortUrlRepository).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The insert hit the unique constraint on `code`.
    #[error("short code already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors surfaced by the shortening and redirect services.
#[derive(Debug, thiserror::Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("expiry of {0} days is out of range")]
    InvalidExpiry(i64),

    /// Every attempt in the budget collided or failed to persist.
    #[error("failed to generate a unique code after {attempts} attempts")]
    Generation { attempts: u32 },

    /// Unknown code, or a code whose record has expired.
    #[error("short url not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
