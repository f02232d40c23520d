//! PostgreSQL implementation of the generator state repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{GeneratorState, ShortCode};
use crate::domain::repositories::GeneratorStateRepository;
use crate::error::AppError;

/// Stores the generator state as the single row of `generator_state`.
///
/// Saving is an upsert that completes before returning, so a code is never
/// handed out ahead of its durable successor.
pub struct PgGeneratorStateRepository {
    pool: Arc<PgPool>,
}

impl PgGeneratorStateRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeneratorStateRepository for PgGeneratorStateRepository {
    async fn load(&self) -> Result<Option<GeneratorState>, AppError> {
        let next_code: Option<String> =
            sqlx::query_scalar("SELECT next_code FROM generator_state WHERE id = 1")
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(next_code.map(|code| GeneratorState::new(ShortCode::new_unchecked(code))))
    }

    async fn save(&self, state: GeneratorState) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO generator_state (id, next_code, updated_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE
            SET next_code = EXCLUDED.next_code, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(state.next_code.as_str())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
