//! Short code lookup and click tracking service.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::ShortUrl;
use crate::domain::errors::ShortenerError;
use crate::domain::repositories::ShortUrlRepository;

/// Outcome of a successful redirect resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: String,
    pub original_url: String,
}

/// Service resolving short codes to their targets.
pub struct RedirectService<R: ShortUrlRepository> {
    repository: Arc<R>,
}

impl<R: ShortUrlRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the raw record for `code`, including expired ones.
    ///
    /// An empty code is never looked up.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] on database errors.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<ShortUrl>, ShortenerError> {
        if code.is_empty() {
            return Ok(None);
        }

        Ok(self.repository.find_by_code(code).await?)
    }

    /// Resolves `code` to its target without counting a click.
    ///
    /// Expired records are reported exactly like unknown codes.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if the code is unknown or expired.
    /// Returns [`ShortenerError::Storage`] if the lookup fails.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, ShortenerError> {
        let Some(record) = self.get_by_code(code).await? else {
            metrics::counter!("redirect_misses_total").increment(1);
            return Err(ShortenerError::NotFound);
        };

        if record.is_expired() {
            debug!(code, "Short url expired");
            metrics::counter!("redirect_misses_total").increment(1);
            return Err(ShortenerError::NotFound);
        }

        Ok(Resolution {
            code: record.code,
            original_url: record.original_url,
        })
    }

    /// Counts one visit to `resolution`. Best effort: failures are only logged.
    pub async fn record_click(&self, resolution: &Resolution) {
        let code = resolution.code.as_str();

        match self.repository.increment_clicks(code).await {
            Ok(true) => {}
            Ok(false) => debug!(code, "Short url vanished before click was counted"),
            Err(e) => {
                warn!(code, error = %e, "Failed to increment clicks");
                metrics::counter!("click_increment_failures_total").increment(1);
            }
        }

        metrics::counter!("redirects_total").increment(1);
    }

    /// Resolves `code` and counts the click.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`]. A failed click increment never fails the call.
    pub async fn resolve_and_track(&self, code: &str) -> Result<Resolution, ShortenerError> {
        let resolution = self.resolve(code).await?;
        self.record_click(&resolution).await;
        Ok(resolution)
    }

    /// Checks that the backing storage answers.
    pub async fn storage_healthy(&self) -> Result<(), ShortenerError> {
        Ok(self.repository.ping().await?)
    }
}
