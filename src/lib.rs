//! # shortlink
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! Clients submit a long URL and receive a short code; visiting the code
//! redirects to the original URL and counts the visit.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short URL entity, errors and the repository trait
//! - **Application Layer** ([`application`]) - Shortening and redirect services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://./data.db"
//! export BASE_URL="http://localhost:8080"   # Optional
//!
//! cargo run
//! ```
//!
//! Migrations are applied at startup. See [`config`] for all options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        GenerationPolicy, RedirectService, Resolution, ShortenerService,
    };
    pub use crate::domain::entities::{NewShortUrl, ShortUrl};
    pub use crate::domain::errors::{ShortenerError, StorageError};
    pub use crate::domain::repositories::ShortUrlRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
