//! Business logic services for the application layer.

pub mod link_service;
pub mod sequence_generator;

pub use link_service::{FAVICON_PROBE, LinkService, ShortenOutcome};
pub use sequence_generator::SequenceGenerator;
