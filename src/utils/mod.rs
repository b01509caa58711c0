//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Validation of submitted target URLs
//! - [`base_url`] - Base URL resolution and short URL formatting
//! - [`db_error`] - Database error classification

pub mod base_url;
pub mod code_generator;
pub mod db_error;
pub mod url_validator;
