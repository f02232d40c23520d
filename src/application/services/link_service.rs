//! Link shortening and resolution service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::services::SequenceGenerator;
use crate::domain::entities::{NewUrlRecord, ShortCode, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::sanitizer::UrlSanitizer;

/// Path browsers probe on their own; never stored as a link.
pub const FAVICON_PROBE: &str = "favicon.ico";

/// Characters that change the meaning of a store lookup.
const LOOKUP_BLOCKED_CHARS: [char; 2] = ['$', '.'];

/// Result of a shorten request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShortenOutcome {
    /// A new record was stored under this code.
    Created(ShortCode),
    /// The input was the browser favicon probe; nothing was stored.
    Ignored,
}

/// Service for shortening URLs and resolving short codes.
///
/// Orchestrates the sanitizer, the sequence generator and the URL repository.
pub struct LinkService {
    url_repository: Arc<dyn UrlRepository>,
    generator: Arc<SequenceGenerator>,
    sanitizer: UrlSanitizer,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        generator: Arc<SequenceGenerator>,
        sanitizer: UrlSanitizer,
    ) -> Self {
        Self {
            url_repository,
            generator,
            sanitizer,
        }
    }

    pub fn generator(&self) -> &SequenceGenerator {
        &self.generator
    }

    pub fn max_url_length(&self) -> usize {
        self.sanitizer.max_length()
    }

    /// Stores `long_url` under the next short code.
    ///
    /// Length bounds are checked before a code is drawn, so rejected input never
    /// advances the sequence or touches the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyInput`] or [`AppError::InputTooLong`] for input
    /// outside the length bounds, and [`AppError::Persistence`] if the code or
    /// the record could not be saved.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenOutcome, AppError> {
        self.sanitizer.check_length(long_url)?;

        if long_url == FAVICON_PROBE {
            debug!("Ignoring favicon probe");
            return Ok(ShortenOutcome::Ignored);
        }

        let sanitized = self.sanitizer.sanitize(long_url)?;
        let short_code = self.generator.next().await?;

        let record = self
            .url_repository
            .create(NewUrlRecord {
                short_code,
                sanitized_url: sanitized.text,
                restoration_map: sanitized.restoration_map,
            })
            .await?;

        info!(
            code = %record.short_code,
            substitutions = record.restoration_map.len(),
            "Shortened URL"
        );

        Ok(ShortenOutcome::Created(record.short_code))
    }

    /// Validates a code taken from a request path before any lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InjectionRejected`] if the code contains `$` or `.`,
    /// and [`AppError::NotFound`] if it contains symbols no issued code can have.
    pub fn parse_lookup_code(&self, code: &str) -> Result<ShortCode, AppError> {
        if code.contains(LOOKUP_BLOCKED_CHARS) {
            return Err(AppError::InjectionRejected {
                code: code.to_string(),
            });
        }

        self.generator
            .alphabet()
            .parse_code(code)
            .map_err(|_| AppError::not_found(code))
    }

    /// Finds the stored record for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    pub async fn find_record(&self, code: &ShortCode) -> Result<UrlRecord, AppError> {
        self.url_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code.as_str()))
    }

    /// Resolves a short code to the original URL.
    ///
    /// The result always carries an `http://` or `https://` scheme.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches and
    /// [`AppError::Internal`] if the stored record is corrupt.
    pub async fn resolve(&self, code: &ShortCode) -> Result<String, AppError> {
        let record = self.find_record(code).await?;
        let target = self.restore(&record)?;

        info!(code = %code, "Resolved short code");

        Ok(target)
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.url_repository.count().await
    }

    /// Rebuilds the original URL of a stored record.
    pub fn restore(&self, record: &UrlRecord) -> Result<String, AppError> {
        Ok(self
            .sanitizer
            .restore(&record.sanitized_url, &record.restoration_map)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GeneratorState;
    use crate::domain::repositories::{MockGeneratorStateRepository, MockUrlRepository};
    use crate::utils::alphabet::Alphabet;
    use crate::utils::sanitizer::{RestorationMap, Substitution};
    use chrono::Utc;

    async fn generator_at(start: &str, saves: usize) -> Arc<SequenceGenerator> {
        let mut repo = MockGeneratorStateRepository::new();
        let state = GeneratorState::new(ShortCode::new_unchecked(start));
        repo.expect_load()
            .times(1)
            .returning(move || Ok(Some(state.clone())));
        repo.expect_save().times(saves).returning(|_| Ok(()));

        Arc::new(
            SequenceGenerator::load(Alphabet::default(), Arc::new(repo))
                .await
                .unwrap(),
        )
    }

    fn create_test_record(code: &str, sanitized: &str, map: Vec<Substitution>) -> UrlRecord {
        UrlRecord::new(
            ShortCode::new_unchecked(code),
            sanitized.to_string(),
            RestorationMap::new(map),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo
            .expect_create()
            .withf(|new_record| {
                new_record.short_code.as_str() == "a0"
                    && new_record.sanitized_url == "httpsxxxexamplexcom"
                    && new_record.restoration_map.len() == 4
            })
            .times(1)
            .returning(|new_record| Ok(new_record.into_record(Utc::now())));

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("a0", 1).await,
            UrlSanitizer::default(),
        );

        let outcome = service.shorten("https://example.com").await.unwrap();

        assert_eq!(
            outcome,
            ShortenOutcome::Created(ShortCode::new_unchecked("a0"))
        );
        assert_eq!(service.generator().peek().await.as_str(), "a1");
    }

    #[tokio::test]
    async fn test_shorten_empty_input() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo.expect_create().times(0);

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let result = service.shorten("").await;

        assert!(matches!(result, Err(AppError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_shorten_too_long_does_not_advance_generator() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo.expect_create().times(0);

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let long_url = format!("https://example.com/{}", "a".repeat(6000));
        let result = service.shorten(&long_url).await;

        assert!(matches!(
            result,
            Err(AppError::InputTooLong { max: 5000, .. })
        ));
        assert_eq!(service.generator().peek().await.as_str(), "0");
    }

    #[tokio::test]
    async fn test_shorten_ignores_favicon_probe() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo.expect_create().times(0);

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let outcome = service.shorten(FAVICON_PROBE).await.unwrap();

        assert_eq!(outcome, ShortenOutcome::Ignored);
        assert_eq!(service.generator().peek().await.as_str(), "0");
    }

    #[tokio::test]
    async fn test_shorten_propagates_store_failure() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::persistence("connection refused")));

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 1).await,
            UrlSanitizer::default(),
        );

        let result = service.shorten("https://example.com").await;

        assert!(matches!(result, Err(AppError::Persistence { .. })));
        // The drawn code is burned, never reissued.
        assert_eq!(service.generator().peek().await.as_str(), "1");
    }

    #[tokio::test]
    async fn test_parse_lookup_code_rejects_injection() {
        let service = LinkService::new(
            Arc::new(MockUrlRepository::new()),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        assert!(matches!(
            service.parse_lookup_code("$where"),
            Err(AppError::InjectionRejected { .. })
        ));
        assert!(matches!(
            service.parse_lookup_code("a.b"),
            Err(AppError::InjectionRejected { .. })
        ));
        assert!(matches!(
            service.parse_lookup_code("favicon.ico"),
            Err(AppError::InjectionRejected { .. })
        ));
    }

    #[tokio::test]
    async fn test_parse_lookup_code_foreign_symbols_are_not_found() {
        let service = LinkService::new(
            Arc::new(MockUrlRepository::new()),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        assert!(matches!(
            service.parse_lookup_code("a%20b"),
            Err(AppError::NotFound { .. })
        ));
        assert!(service.parse_lookup_code("a-_Z").is_ok());
    }

    #[tokio::test]
    async fn test_resolve_restores_original_url() {
        let mut mock_url_repo = MockUrlRepository::new();
        let record = create_test_record(
            "b1",
            "httpsxxxexamplexcomxpath",
            vec![
                Substitution { position: 5, symbol_index: 2 },
                Substitution { position: 6, symbol_index: 0 },
                Substitution { position: 7, symbol_index: 0 },
                Substitution { position: 15, symbol_index: 3 },
                Substitution { position: 19, symbol_index: 0 },
            ],
        );
        mock_url_repo
            .expect_find_by_code()
            .withf(|code| code.as_str() == "b1")
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let url = service
            .resolve(&ShortCode::new_unchecked("b1"))
            .await
            .unwrap();

        assert_eq!(url, "https://example.com/path");
    }

    #[tokio::test]
    async fn test_resolve_adds_scheme() {
        let mut mock_url_repo = MockUrlRepository::new();
        let record = create_test_record(
            "c",
            "examplexcom",
            vec![Substitution { position: 7, symbol_index: 3 }],
        );
        mock_url_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let url = service
            .resolve(&ShortCode::new_unchecked("c"))
            .await
            .unwrap();

        assert_eq!(url, "http://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_url_repo = MockUrlRepository::new();
        mock_url_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let result = service.resolve(&ShortCode::new_unchecked("zz")).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_corrupt_record() {
        let mut mock_url_repo = MockUrlRepository::new();
        let record = create_test_record(
            "d",
            "abc",
            vec![Substitution { position: 40, symbol_index: 0 }],
        );
        mock_url_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = LinkService::new(
            Arc::new(mock_url_repo),
            generator_at("0", 0).await,
            UrlSanitizer::default(),
        );

        let result = service.resolve(&ShortCode::new_unchecked("d")).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
