//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain repository traits and the redirect cache.
//!
//! # Modules
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod persistence;
