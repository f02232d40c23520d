//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening and resolution
//! - [`services::sequence_generator::SequenceGenerator`] - Sequential code issuance

pub mod services;
