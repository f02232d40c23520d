//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of restored redirect targets keyed by short code.
///
/// Stored records never change, so an entry can only expire, never go stale.
/// Implementations are fail-open: a broken cache degrades to store lookups.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op cache
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached redirect target for a short code.
    ///
    /// `Ok(None)` on a miss. Production implementations log backend errors and
    /// report them as misses.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Caches a redirect target.
    ///
    /// `ttl_seconds` overrides the implementation default when set.
    async fn set_url(
        &self,
        short_code: &str,
        target_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}
