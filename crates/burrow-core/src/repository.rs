use crate::error::StorageError;
use crate::record::{RecordId, UrlRecord};
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a repository.
///
/// This trait provides only the lookups the resolve path needs, so
/// read-only consumers never get access to `insert`.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record with the given id.
    /// Returns `None` if no such record exists.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<UrlRecord>>;

    /// Retrieves a record whose `original_url` equals the given URL.
    ///
    /// The store does not enforce uniqueness on `original_url`. When several
    /// records match, the earliest one is returned.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<UrlRecord>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record for `original_url` and returns it as stored,
    /// including the id the store assigned to it.
    async fn insert(&self, original_url: &str) -> Result<UrlRecord>;

    /// Releases the resources held by the store handle.
    ///
    /// Called once during shutdown, after the last request has finished.
    async fn close(&self) {}
}
