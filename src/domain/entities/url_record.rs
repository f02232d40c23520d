//! URL record entity representing a stored short code mapping.

use chrono::{DateTime, Utc};

use crate::domain::entities::ShortCode;
use crate::utils::sanitizer::RestorationMap;

/// A stored mapping from a short code to a sanitized URL.
///
/// Records are immutable once written. The original URL is rebuilt by applying
/// `restoration_map` to `sanitized_url`.
#[derive(Debug, Clone)]
pub struct UrlRecord {
    pub short_code: ShortCode,
    pub sanitized_url: String,
    pub restoration_map: RestorationMap,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        short_code: ShortCode,
        sanitized_url: String,
        restoration_map: RestorationMap,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            sanitized_url,
            restoration_map,
            created_at,
        }
    }
}

/// Input data for storing a new record. The store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub short_code: ShortCode,
    pub sanitized_url: String,
    pub restoration_map: RestorationMap,
}

impl NewUrlRecord {
    /// Converts into a full record stamped with `created_at`.
    pub fn into_record(self, created_at: DateTime<Utc>) -> UrlRecord {
        UrlRecord::new(
            self.short_code,
            self.sanitized_url,
            self.restoration_map,
            created_at,
        )
    }
}
