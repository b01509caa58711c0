//! Domain layer containing business entities, errors and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Error kinds shared by services and repositories
//!
//! The domain layer has no dependency on the HTTP layer. Business logic lives in
//! services (see [`crate::application::services`]).

pub mod entities;
pub mod errors;
pub mod repositories;
