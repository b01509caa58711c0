//! Short URL entity: one stored mapping from a code to its target.

use chrono::{DateTime, Utc};

/// A stored short URL record.
///
/// Only `clicks` changes after creation. Expired records stay in storage and
/// are treated as absent by the redirect path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        clicks: i64,
    ) -> Self {
        Self {
            code,
            original_url,
            created_at,
            expires_at,
            clicks,
        }
    }

    /// Returns true if the record has an expiry and it is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e <= now)
    }

    /// Returns true if the record has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for persisting a freshly generated short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewShortUrl {
    /// The record as it exists right after a successful insert.
    pub fn into_record(self) -> ShortUrl {
        ShortUrl::new(
            self.code,
            self.original_url,
            self.created_at,
            self.expires_at,
            0,
        )
    }
}
