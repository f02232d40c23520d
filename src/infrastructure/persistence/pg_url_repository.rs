//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, ShortCode, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_short_code;
use crate::utils::sanitizer::RestorationMap;

/// Row shape of `url_records`.
#[derive(Debug, sqlx::FromRow)]
struct UrlRecordRow {
    short_code: String,
    sanitized_url: String,
    positions: Vec<i32>,
    symbol_indexes: Vec<i16>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UrlRecordRow> for UrlRecord {
    type Error = AppError;

    fn try_from(row: UrlRecordRow) -> Result<Self, Self::Error> {
        let restoration_map = RestorationMap::from_columns(&row.positions, &row.symbol_indexes)
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Corrupt restoration map for short code {}",
                    row.short_code
                ))
            })?;

        Ok(UrlRecord::new(
            ShortCode::new_unchecked(row.short_code),
            row.sanitized_url,
            restoration_map,
            row.created_at,
        ))
    }
}

/// PostgreSQL repository for URL records.
///
/// The short code is the table's primary key, so a duplicate insert fails at the
/// database even if the generator were misconfigured.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRecordRow>(
            r#"
            INSERT INTO url_records (short_code, sanitized_url, positions, symbol_indexes)
            VALUES ($1, $2, $3, $4)
            RETURNING short_code, sanitized_url, positions, symbol_indexes, created_at
            "#,
        )
        .bind(new_record.short_code.as_str())
        .bind(&new_record.sanitized_url)
        .bind(new_record.restoration_map.positions())
        .bind(new_record.restoration_map.symbol_indexes())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_short_code(&e) {
                AppError::Conflict {
                    code: new_record.short_code.to_string(),
                }
            } else {
                AppError::from(e)
            }
        })?;

        row.try_into()
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRecordRow>(
            r#"
            SELECT short_code, sanitized_url, positions, symbol_indexes, created_at
            FROM url_records
            WHERE short_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlRecord::try_from).transpose()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_records")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
