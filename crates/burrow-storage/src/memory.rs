use async_trait::async_trait;
use burrow_core::repository::{ReadRepository, Repository, Result};
use burrow_core::{RecordId, UrlRecord};
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Ids are minted like document-store object ids: 8 hex digits of the
/// creation second followed by 16 hex digits of a monotonically increasing
/// counter. Lookups by `original_url` scan the map, which is fine for local
/// development and tests but not for large data sets.
///
/// As with the real stores, nothing prevents two records from sharing the
/// same `original_url`.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<RecordId, String>,
    sequence: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if no record has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn next_id(&self) -> RecordId {
        let seconds = Timestamp::now().as_second().clamp(0, u32::MAX as i64) as u32;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        RecordId::new_unchecked(format!("{:08x}{:016x}", seconds, sequence))
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<UrlRecord>> {
        Ok(self.storage.get(id).map(|entry| UrlRecord {
            id: entry.key().clone(),
            original_url: entry.value().clone(),
        }))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<UrlRecord>> {
        let earliest = self
            .storage
            .iter()
            .filter(|entry| entry.value() == original_url)
            .map(|entry| entry.key().clone())
            .min_by(|a, b| a.as_str()[8..].cmp(&b.as_str()[8..]));

        Ok(earliest.map(|id| UrlRecord {
            id,
            original_url: original_url.to_owned(),
        }))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, original_url: &str) -> Result<UrlRecord> {
        let id = self.next_id();
        self.storage.insert(id.clone(), original_url.to_owned());

        Ok(UrlRecord {
            id,
            original_url: original_url.to_owned(),
        })
    }
}
