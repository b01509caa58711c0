//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin CLI
//! a small API.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Short URL creation with deduplication
//! - [`services::redirect_service::RedirectService`] - Code lookup, expiry checks and click tracking

pub mod services;
