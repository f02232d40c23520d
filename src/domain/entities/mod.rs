//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortCode`] - A code drawn from the generator alphabet
//! - [`UrlRecord`] - A stored short code mapping
//! - [`GeneratorState`] - The singleton counter state
//!
//! `NewUrlRecord` is the creation-side counterpart of [`UrlRecord`].

pub mod generator_state;
pub mod short_code;
pub mod url_record;

pub use generator_state::GeneratorState;
pub use short_code::ShortCode;
pub use url_record::{NewUrlRecord, UrlRecord};
