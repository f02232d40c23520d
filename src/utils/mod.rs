//! Helpers shared across layers.
//!
//! - [`alphabet`] - Code alphabet and enumeration order
//! - [`sanitizer`] - Reversible URL sanitization
//! - [`db_error`] - PostgreSQL error classification

pub mod alphabet;
pub mod db_error;
pub mod sanitizer;
