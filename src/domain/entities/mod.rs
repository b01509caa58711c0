//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored code to URL mapping with its click counter
//! - [`NewShortUrl`] - Input for creating a record

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
