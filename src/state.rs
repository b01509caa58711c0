//! Shared application state injected into handlers.

use axum::http::HeaderMap;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{GenerationPolicy, RedirectService, ShortenerService};
use crate::infrastructure::persistence::SqliteShortUrlRepository;
use crate::utils::base_url::base_url_from_headers;

#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService<SqliteShortUrlRepository>>,
    pub redirect_service: Arc<RedirectService<SqliteShortUrlRepository>>,
    /// Configured base for `short_url`; `None` derives it from the request.
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires both services to one repository over `pool`.
    pub fn new(pool: Arc<SqlitePool>, policy: GenerationPolicy, base_url: Option<String>) -> Self {
        let repository = Arc::new(SqliteShortUrlRepository::new(pool));

        Self {
            shortener_service: Arc::new(ShortenerService::with_policy(
                repository.clone(),
                policy,
            )),
            redirect_service: Arc::new(RedirectService::new(repository)),
            base_url,
        }
    }

    /// The base URL for this request: configured value first, then the `Host` header.
    pub fn resolve_base_url(&self, headers: &HeaderMap) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| base_url_from_headers(headers))
    }
}
