//! Repository trait for the sequence generator's singleton state.

use crate::domain::entities::GeneratorState;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage for the next short code to issue.
///
/// Saving must be durable before it returns `Ok`: the generator hands out a
/// code only after the state past it has been saved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeneratorStateRepository: Send + Sync {
    /// Loads the persisted state, or `None` if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn load(&self) -> Result<Option<GeneratorState>, AppError>;

    /// Replaces the persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the write did not succeed.
    async fn save(&self, state: GeneratorState) -> Result<(), AppError>;
}
