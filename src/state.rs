//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::cache::CacheService;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub cache: Arc<dyn CacheService>,
    /// Name of the storage backend, reported by `/health`.
    pub storage_backend: &'static str,
    /// Prefix shown in front of issued codes on the submission page.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        cache: Arc<dyn CacheService>,
        storage_backend: &'static str,
    ) -> Self {
        Self {
            link_service,
            cache,
            storage_backend,
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, base_url: Option<String>) -> Self {
        self.public_base_url = base_url;
        self
    }
}
