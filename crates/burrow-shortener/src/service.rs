use crate::error::{Result, ShortenerError};
use crate::shortener::{Shortened, Shortener};
use async_trait::async_trait;
use burrow_core::{validate_url, Repository, ShortCode, UrlRecord};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` to handle:
/// - URL validation on create
/// - get-or-insert of records keyed by their original URL
/// - encoding record ids into short codes and back
///
/// Create is a lookup followed by an insert with no lock in between. Two
/// concurrent creates for the same URL can therefore both insert; each gets
/// a valid code for the same target.
#[derive(Debug)]
pub struct ShortenerService<R> {
    repository: Arc<R>,
}

impl<R: Repository> ShortenerService<R> {
    /// Creates a new `ShortenerService` on top of a repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Returns the repository backing this service.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    fn shortened(record: UrlRecord, host_for_links: &str) -> Shortened {
        let short_code = ShortCode::from_id(&record.id);
        let short_url = short_code.to_url(&format!("https://{}", host_for_links));
        Shortened {
            short_url,
            short_code,
            record,
        }
    }
}

#[async_trait]
impl<R: Repository> Shortener for ShortenerService<R> {
    async fn create(&self, raw_url: &str, host_for_links: &str) -> Result<Shortened> {
        validate_url(raw_url)?;

        if let Some(existing) = self.repository.find_by_original_url(raw_url).await? {
            debug!(id = %existing.id, url = %raw_url, "url already shortened");
            return Ok(Self::shortened(existing, host_for_links));
        }

        let record = self.repository.insert(raw_url).await?;
        info!(id = %record.id, url = %raw_url, "created url record");

        Ok(Self::shortened(record, host_for_links))
    }

    async fn resolve(&self, code: &str) -> Result<String> {
        trace!(code = %code, "resolving short code");

        let id = ShortCode::new_unchecked(code).decode_id().map_err(|e| {
            debug!(code = %code, error = %e, "short code does not name a record");
            ShortenerError::from(e)
        })?;

        match self.repository.find_by_id(&id).await? {
            Some(record) => {
                debug!(code = %code, url = %record.original_url, "resolved short code");
                Ok(record.original_url)
            }
            None => {
                trace!(code = %code, id = %id, "short code not found");
                Err(ShortenerError::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_core::repository::Result as StorageResult;
    use burrow_core::{ReadRepository, RecordId, StorageError};
    use burrow_storage::{InMemoryRepository, TimeoutRepository};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn test_service() -> ShortenerService<InMemoryRepository> {
        ShortenerService::new(InMemoryRepository::new())
    }

    fn code_of(short_url: &str) -> &str {
        short_url.rsplit('/').next().unwrap()
    }

    /// Counts how often the store is asked for a record by id.
    #[derive(Default)]
    struct CountingRepository {
        inner: InMemoryRepository,
        id_lookups: AtomicUsize,
    }

    #[async_trait]
    impl ReadRepository for CountingRepository {
        async fn find_by_id(&self, id: &RecordId) -> StorageResult<Option<UrlRecord>> {
            self.id_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn find_by_original_url(
            &self,
            original_url: &str,
        ) -> StorageResult<Option<UrlRecord>> {
            self.inner.find_by_original_url(original_url).await
        }
    }

    #[async_trait]
    impl Repository for CountingRepository {
        async fn insert(&self, original_url: &str) -> StorageResult<UrlRecord> {
            self.inner.insert(original_url).await
        }
    }

    /// A store whose connection is gone.
    struct UnavailableRepository;

    #[async_trait]
    impl ReadRepository for UnavailableRepository {
        async fn find_by_id(&self, _id: &RecordId) -> StorageResult<Option<UrlRecord>> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_original_url(
            &self,
            _original_url: &str,
        ) -> StorageResult<Option<UrlRecord>> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl Repository for UnavailableRepository {
        async fn insert(&self, _original_url: &str) -> StorageResult<UrlRecord> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn create_then_resolve() {
        let service = test_service();

        let shortened = service
            .create("https://example.com/a", "short.ly")
            .await
            .unwrap();
        assert!(shortened.short_url.starts_with("https://short.ly/"));
        assert_eq!(code_of(&shortened.short_url), shortened.short_code.as_str());
        assert_eq!(shortened.record.original_url, "https://example.com/a");

        let url = service
            .resolve(code_of(&shortened.short_url))
            .await
            .unwrap();
        assert_eq!(url, "https://example.com/a");
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let service = test_service();

        let first = service
            .create("https://example.com/a", "short.ly")
            .await
            .unwrap();
        let second = service
            .create("https://example.com/a", "short.ly")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(service.repository().len(), 1);
    }

    #[tokio::test]
    async fn create_with_other_host_reuses_record() {
        let service = test_service();

        let first = service
            .create("https://example.com/a", "short.ly")
            .await
            .unwrap();
        let second = service
            .create("https://example.com/a", "tiny.example")
            .await
            .unwrap();

        assert_ne!(first.short_url, second.short_url);
        assert_eq!(first.short_code, second.short_code);
        assert_eq!(service.repository().len(), 1);

        for shortened in [first, second] {
            let url = service
                .resolve(shortened.short_code.as_str())
                .await
                .unwrap();
            assert_eq!(url, "https://example.com/a");
        }
    }

    #[tokio::test]
    async fn distinct_urls_get_distinct_codes() {
        let service = test_service();

        let a = service
            .create("https://example.com/a", "short.ly")
            .await
            .unwrap();
        let b = service
            .create("https://example.com/b", "short.ly")
            .await
            .unwrap();

        assert_ne!(a.short_code, b.short_code);
        assert_eq!(service.repository().len(), 2);
    }

    #[tokio::test]
    async fn create_with_invalid_url_fails() {
        let service = test_service();

        for url in [
            "example.com/page",
            "mailto:user@example.com",
            "http://localhost/x",
            "",
        ] {
            let err = service.create(url, "short.ly").await.unwrap_err();
            assert!(matches!(err, ShortenerError::InvalidUrl(_)), "{url}");
        }

        assert!(service.repository().is_empty());
    }

    #[tokio::test]
    async fn resolve_unknown_code() {
        let service = test_service();

        let err = service.resolve("not-a-real-code").await.unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound));
    }

    #[tokio::test]
    async fn resolve_well_formed_but_missing_code() {
        let service = test_service();
        let id = RecordId::parse("000000000000000000000000").unwrap();

        let err = service
            .resolve(ShortCode::from_id(&id).as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::NotFound));
    }

    #[tokio::test]
    async fn wrong_shape_never_reaches_store() {
        let service = ShortenerService::new(CountingRepository::default());

        // Not base64, decodes to a short string, and decodes to uppercase hex.
        for code in [
            "%%%",
            "c2hvcnQ",
            "NjVBMUYwQzJFNEIwQTFCMkMzRDRFNUY2",
        ] {
            let err = service.resolve(code).await.unwrap_err();
            assert!(matches!(err, ShortenerError::NotFound), "{code}");
        }

        assert_eq!(service.repository().id_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_is_not_not_found() {
        let service = ShortenerService::new(UnavailableRepository);
        let id = RecordId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();

        let err = service
            .resolve(ShortCode::from_id(&id).as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::StoreUnavailable(_)));

        let err = service
            .create("https://example.com", "short.ly")
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn stuck_store_surfaces_as_unavailable() {
        struct StuckRepository;

        #[async_trait]
        impl ReadRepository for StuckRepository {
            async fn find_by_id(&self, _id: &RecordId) -> StorageResult<Option<UrlRecord>> {
                std::future::pending().await
            }

            async fn find_by_original_url(
                &self,
                _original_url: &str,
            ) -> StorageResult<Option<UrlRecord>> {
                std::future::pending().await
            }
        }

        #[async_trait]
        impl Repository for StuckRepository {
            async fn insert(&self, _original_url: &str) -> StorageResult<UrlRecord> {
                std::future::pending().await
            }
        }

        let service = ShortenerService::new(TimeoutRepository::new(
            StuckRepository,
            Duration::from_millis(50),
        ));

        let err = service
            .create("https://example.com", "short.ly")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShortenerError::StoreUnavailable(StorageError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_touching_store() {
        let service = ShortenerService::new(UnavailableRepository);

        let err = service
            .create("http://localhost/x", "short.ly")
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidUrl(_)));
    }

    /// Lookup-then-insert is not atomic, so concurrent creates for one URL
    /// may store more than one record. Every code handed out must still
    /// resolve to the submitted URL.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_may_duplicate_but_all_resolve() {
        const WRITERS: usize = 16;
        let service = Arc::new(test_service());

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .create("https://example.com/race", "short.ly")
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created = Vec::with_capacity(WRITERS);
        for handle in handles {
            created.push(handle.await.unwrap());
        }

        let records = service.repository().len();
        assert!((1..=WRITERS).contains(&records), "{records} records");

        for shortened in created {
            let url = service
                .resolve(shortened.short_code.as_str())
                .await
                .unwrap();
            assert_eq!(url, "https://example.com/race");
        }
    }
}
