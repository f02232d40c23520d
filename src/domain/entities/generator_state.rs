//! Persisted state of the sequence generator.

use crate::domain::entities::ShortCode;

/// The next code the generator will issue.
///
/// Exactly one instance exists per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorState {
    pub next_code: ShortCode,
}

impl GeneratorState {
    pub fn new(next_code: ShortCode) -> Self {
        Self { next_code }
    }
}
