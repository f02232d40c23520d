//! In-memory store for development and tests.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Mutex;

use crate::domain::entities::{GeneratorState, NewUrlRecord, ShortCode, UrlRecord};
use crate::domain::repositories::{GeneratorStateRepository, UrlRepository};
use crate::error::AppError;

/// Process-local implementation of both repository traits.
///
/// Records live in a [`DashMap`] keyed by short code, so concurrent inserts and
/// lookups on different codes do not block each other. Nothing survives a
/// restart, which makes the store unsuitable for production.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<String, UrlRecord>,
    generator_state: Mutex<Option<GeneratorState>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryStore {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        match self.records.entry(new_record.short_code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(AppError::Conflict {
                code: new_record.short_code.into_inner(),
            }),
            Entry::Vacant(slot) => {
                let record = new_record.into_record(Utc::now());
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.records.get(code.as_str()).map(|r| r.value().clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.len() as i64)
    }
}

#[async_trait]
impl GeneratorStateRepository for InMemoryStore {
    async fn load(&self) -> Result<Option<GeneratorState>, AppError> {
        let state = self
            .generator_state
            .lock()
            .map_err(|_| AppError::persistence("generator state lock poisoned"))?;
        Ok(state.clone())
    }

    async fn save(&self, state: GeneratorState) -> Result<(), AppError> {
        let mut slot = self
            .generator_state
            .lock()
            .map_err(|_| AppError::persistence("generator state lock poisoned"))?;
        *slot = Some(state);
        Ok(())
    }
}
