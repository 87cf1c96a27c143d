use async_trait::async_trait;
use burrow_core::repository::{ReadRepository, Repository, Result};
use burrow_core::{RecordId, StorageError, UrlRecord};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// A repository decorator that bounds every store call.
///
/// A call that does not finish within `timeout` is abandoned and reported as
/// [`StorageError::Timeout`], so a stuck store fails the request instead of
/// hanging it.
#[derive(Debug, Clone)]
pub struct TimeoutRepository<R> {
    inner: R,
    timeout: Duration,
}

impl<R: ReadRepository> TimeoutRepository<R> {
    /// Wraps `inner`, limiting each operation to `timeout`.
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T: Send>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>> + Send,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.timeout, "store operation timed out");
                Err(StorageError::Timeout(format!(
                    "{} did not complete within {:?}",
                    operation, self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl<R: ReadRepository> ReadRepository for TimeoutRepository<R> {
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<UrlRecord>> {
        self.bounded("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<UrlRecord>> {
        self.bounded(
            "find_by_original_url",
            self.inner.find_by_original_url(original_url),
        )
        .await
    }
}

#[async_trait]
impl<R: Repository> Repository for TimeoutRepository<R> {
    async fn insert(&self, original_url: &str) -> Result<UrlRecord> {
        self.bounded("insert", self.inner.insert(original_url)).await
    }

    async fn close(&self) {
        self.inner.close().await;
    }
}
