//! Business logic services for the application layer.

pub mod redirect_service;
pub mod shortener_service;

pub use redirect_service::{RedirectService, Resolution};
pub use shortener_service::{DEFAULT_MAX_ATTEMPTS, GenerationPolicy, ShortenerService};
