//! Short URL creation service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::{ShortenerError, StorageError};
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved};
use crate::utils::url_validator::validate_url;

/// Default number of generation attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Code length and retry budget used when generating a new code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    pub code_length: usize,
    pub max_attempts: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service for validating, deduplicating and persisting short URLs.
///
/// Uniqueness of codes is ultimately enforced by the repository: a lost race on
/// insert comes back as [`StorageError::Conflict`] and costs one attempt.
pub struct ShortenerService<R: ShortUrlRepository> {
    repository: Arc<R>,
    policy: GenerationPolicy,
}

impl<R: ShortUrlRepository> ShortenerService<R> {
    /// Creates a service with the default [`GenerationPolicy`].
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_policy(repository, GenerationPolicy::default())
    }

    /// Creates a service with an explicit generation policy.
    pub fn with_policy(repository: Arc<R>, policy: GenerationPolicy) -> Self {
        Self { repository, policy }
    }

    /// Returns the policy used by [`Self::create_short_url`].
    pub fn policy(&self) -> GenerationPolicy {
        self.policy
    }

    /// Creates a short URL using the service's generation policy.
    ///
    /// See [`Self::create_short_url_with`].
    pub async fn create_short_url(
        &self,
        original_url: &str,
        expiry_days: Option<i64>,
    ) -> Result<ShortUrl, ShortenerError> {
        self.create_short_url_with(original_url, expiry_days, self.policy)
            .await
    }

    /// Creates a short URL, or returns the active one already stored for it.
    ///
    /// # Deduplication
    ///
    /// If a non-expired record exists for exactly the same string, it is returned
    /// unchanged. The requested expiry is ignored in that case: the first write wins.
    ///
    /// # Expiry
    ///
    /// `expiry_days` of `None` or `Some(0)` means the record never expires.
    /// Negative values are accepted and produce an already expired record.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::InvalidUrl`] if the URL is not an absolute HTTP(S) URL.
    /// Returns [`ShortenerError::InvalidExpiry`] if the expiry overflows the timestamp range.
    /// Returns [`ShortenerError::Generation`] if every attempt collided or failed to persist.
    /// Returns [`ShortenerError::Storage`] if a lookup fails.
    pub async fn create_short_url_with(
        &self,
        original_url: &str,
        expiry_days: Option<i64>,
        policy: GenerationPolicy,
    ) -> Result<ShortUrl, ShortenerError> {
        validate_url(original_url).map_err(|e| ShortenerError::InvalidUrl(e.to_string()))?;

        let now = Utc::now();
        let expires_at = expiry_from_days(now, expiry_days)?;

        if let Some(existing) = self
            .repository
            .find_by_original_url(original_url, now)
            .await?
        {
            debug!(code = %existing.code, "Reusing existing short url");
            metrics::counter!("short_urls_deduplicated_total").increment(1);
            return Ok(existing);
        }

        for attempt in 1..=policy.max_attempts {
            let code = generate_code(policy.code_length);

            if is_reserved(&code) {
                debug!(attempt, "Generated code is reserved");
                continue;
            }

            if self.repository.find_by_code(&code).await?.is_some() {
                debug!(attempt, "Generated code already taken");
                metrics::counter!("short_code_collisions_total").increment(1);
                continue;
            }

            let new_url = NewShortUrl {
                code,
                original_url: original_url.to_string(),
                created_at: now,
                expires_at,
            };

            match self.repository.insert_if_unique(new_url).await {
                Ok(created) => {
                    info!(code = %created.code, attempt, "Short url created");
                    metrics::counter!("short_urls_created_total").increment(1);
                    return Ok(created);
                }
                Err(StorageError::Conflict) => {
                    debug!(attempt, "Code taken by a concurrent insert");
                    metrics::counter!("short_code_collisions_total").increment(1);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Failed to persist short url");
                }
            }
        }

        warn!(
            attempts = policy.max_attempts,
            code_length = policy.code_length,
            "Exhausted short code generation attempts"
        );
        metrics::counter!("short_code_generation_failures_total").increment(1);

        Err(ShortenerError::Generation {
            attempts: policy.max_attempts,
        })
    }
}

/// Computes the expiry timestamp for a request made at `now`.
fn expiry_from_days(
    now: DateTime<Utc>,
    expiry_days: Option<i64>,
) -> Result<Option<DateTime<Utc>>, ShortenerError> {
    match expiry_days {
        None | Some(0) => Ok(None),
        Some(days) => Duration::try_days(days)
            .and_then(|d| now.checked_add_signed(d))
            .map(Some)
            .ok_or(ShortenerError::InvalidExpiry(days)),
    }
}
