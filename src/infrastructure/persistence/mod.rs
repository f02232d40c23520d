//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL record storage
//! - [`PgGeneratorStateRepository`] - PostgreSQL generator state row
//! - [`InMemoryStore`] - Process-local store implementing both traits

pub mod memory;
pub mod pg_generator_state_repository;
pub mod pg_url_repository;

pub use memory::InMemoryStore;
pub use pg_generator_state_repository::PgGeneratorStateRepository;
pub use pg_url_repository::PgUrlRepository;
