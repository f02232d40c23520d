//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence adapter contract. Implementations live in
//! `crate::infrastructure::persistence`; mocks are generated via `mockall` for tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Short code record storage
//! - [`GeneratorStateRepository`] - Singleton generator state
//!
//! # Uniqueness
//!
//! Implementations must reject a second record for the same short code. The
//! generator never issues a code twice, and the store enforces it again.

pub mod generator_state_repository;
pub mod url_repository;

pub use generator_state_repository::GeneratorStateRepository;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use generator_state_repository::MockGeneratorStateRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
