//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! The shortening and redirect services never read it directly; the server hands
//! them explicit values.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://./data.db`)
//! - `BASE_URL` - Base used to build `short_url` (default: derived from the `Host` header)
//! - `SECRET_KEY` - Opaque application secret (default: `dev-secret`, warned about)
//! - `RATELIMIT_DEFAULT` - Per-IP limit such as `60 per minute` (default: `60 per minute`)
//! - `BEHIND_PROXY` - Read client IP from `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CODE_LENGTH` - Generated code length (default: 6)
//! - `MAX_ATTEMPTS` - Code generation attempts per request (default: 8)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::GenerationPolicy;
use crate::infrastructure::persistence::PoolSettings;

/// Secret used when `SECRET_KEY` is not set.
pub const DEFAULT_SECRET_KEY: &str = "dev-secret";

/// A request quota: `requests` per `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub requests: u32,
    pub period: Duration,
}

impl RateLimit {
    /// Interval after which one more request is allowed.
    pub fn replenish_interval(&self) -> Duration {
        self.period / self.requests.max(1)
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests: 60,
            period: Duration::from_secs(60),
        }
    }
}

impl FromStr for RateLimit {
    type Err = anyhow::Error;

    /// Parses `"<n> per <second|minute|hour|day>"`, also accepting `"<n>/<unit>"`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('/', " per ");
        let mut parts = normalized.split_whitespace();

        let (Some(count), Some("per"), Some(unit), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            anyhow::bail!("rate limit must look like '60 per minute', got '{s}'");
        };

        let requests: u32 = count
            .parse()
            .with_context(|| format!("invalid request count in rate limit '{s}'"))?;

        let period = match unit.trim_end_matches('s') {
            "second" => Duration::from_secs(1),
            "minute" => Duration::from_secs(60),
            "hour" => Duration::from_secs(3600),
            "day" => Duration::from_secs(86_400),
            other => anyhow::bail!("unknown rate limit unit '{other}'"),
        };

        Ok(Self { requests, period })
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base for `short_url`; `None` means derive it per request from `Host`.
    pub base_url: Option<String>,
    pub secret_key: String,
    pub rate_limit: RateLimit,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub code_length: usize,
    pub max_attempts: u32,
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds.
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./data.db".to_string());

        let base_url = env::var("BASE_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string());

        let rate_limit = match env::var("RATELIMIT_DEFAULT") {
            Ok(v) => v.parse().context("Failed to parse RATELIMIT_DEFAULT")?,
            Err(_) => RateLimit::default(),
        };

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let defaults = GenerationPolicy::default();
        let code_length = parse_var("CODE_LENGTH")?.unwrap_or(defaults.code_length);
        let max_attempts = parse_var("MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts);

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(10);
        let db_connect_timeout = parse_var("DB_CONNECT_TIMEOUT")?.unwrap_or(30);

        Ok(Self {
            database_url,
            base_url,
            secret_key,
            rate_limit,
            behind_proxy,
            listen_addr,
            log_level,
            log_format,
            code_length,
            max_attempts,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `database_url` is not a SQLite URL
    /// - `base_url` is not an absolute HTTP(S) URL
    /// - `secret_key` is empty
    /// - the rate limit allows zero requests
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `code_length` or `max_attempts` is out of range
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            // Not echoed: a URL meant for another database may carry a password.
            anyhow::bail!("DATABASE_URL must be a SQLite URL starting with 'sqlite:'");
        }

        if let Some(ref base_url) = self.base_url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                base_url
            );
        }

        if self.secret_key.is_empty() {
            anyhow::bail!("SECRET_KEY must not be empty");
        }

        if self.rate_limit.requests == 0 {
            anyhow::bail!("RATELIMIT_DEFAULT must allow at least one request");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !(1..=64).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and 64, got {}",
                self.code_length
            );
        }

        if !(1..=1000).contains(&self.max_attempts) {
            anyhow::bail!(
                "MAX_ATTEMPTS must be between 1 and 1000, got {}",
                self.max_attempts
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Code generation settings handed to the shortening service.
    pub fn generation_policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            code_length: self.code_length,
            max_attempts: self.max_attempts,
        }
    }

    /// Connection pool settings.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_connect_timeout),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        match self.base_url {
            Some(ref base_url) => tracing::info!("  Base URL: {}", base_url),
            None => tracing::info!("  Base URL: derived from Host header"),
        }
        tracing::info!(
            "  Rate limit: {} per {}s",
            self.rate_limit.requests,
            self.rate_limit.period.as_secs()
        );
        tracing::info!(
            "  Code length: {}, max attempts: {}",
            self.code_length,
            self.max_attempts
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.secret_key == DEFAULT_SECRET_KEY {
            tracing::warn!("SECRET_KEY is using the development default");
        }
    }
}

/// Parses an optional numeric environment variable.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{v}'")),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
