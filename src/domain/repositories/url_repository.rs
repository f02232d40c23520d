//! Repository trait for short code records.

use crate::domain::entities::{NewUrlRecord, ShortCode, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for stored URL records.
///
/// Records hold URLs sanitized with
/// [`UnsafeCharset`](crate::utils::sanitizer::UnsafeCharset); implementations store
/// the sanitized text and restoration map verbatim and never interpret them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already stored.
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
