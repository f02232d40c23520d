#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use shortlink::application::services::{LinkService, SequenceGenerator};
use shortlink::domain::entities::{GeneratorState, NewUrlRecord, ShortCode, UrlRecord};
use shortlink::domain::repositories::{GeneratorStateRepository, UrlRepository};
use shortlink::error::AppError;
use shortlink::infrastructure::cache::NullCache;
use shortlink::infrastructure::persistence::InMemoryStore;
use shortlink::routes::{RESERVED_CODES, router};
use shortlink::state::AppState;
use shortlink::utils::alphabet::Alphabet;
use shortlink::utils::sanitizer::{DEFAULT_MAX_URL_LENGTH, UrlSanitizer};

pub const STATIC_DIR: &str = "public";

/// Builds state over a fresh in-memory store.
pub async fn create_test_state() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = create_state_with(store.clone(), store.clone(), DEFAULT_MAX_URL_LENGTH).await;
    (state, store)
}

pub async fn create_state_with(
    store: Arc<dyn UrlRepository>,
    state_repository: Arc<dyn GeneratorStateRepository>,
    max_url_length: usize,
) -> AppState {
    let generator = SequenceGenerator::load(Alphabet::default(), state_repository)
        .await
        .unwrap()
        .with_reserved(RESERVED_CODES);

    let link_service = Arc::new(LinkService::new(
        store,
        Arc::new(generator),
        UrlSanitizer::with_max_length(max_url_length),
    ));

    AppState::new(link_service, Arc::new(NullCache::new()), "memory")
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state, STATIC_DIR)).unwrap()
}

/// Generator state store whose saves can be switched to fail.
#[derive(Default)]
pub struct FlakyStateRepository {
    inner: InMemoryStore,
    failing: AtomicBool,
}

impl FlakyStateRepository {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl GeneratorStateRepository for FlakyStateRepository {
    async fn load(&self) -> Result<Option<GeneratorState>, AppError> {
        self.inner.load().await
    }

    async fn save(&self, state: GeneratorState) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::persistence("simulated write failure"));
        }
        self.inner.save(state).await
    }
}

/// Record store that counts lookups.
#[derive(Default)]
pub struct CountingUrlRepository {
    inner: InMemoryStore,
    lookups: AtomicUsize,
}

impl CountingUrlRepository {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlRepository for CountingUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.inner.create(new_record).await
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<UrlRecord>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_code(code).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.inner.count().await
    }
}
