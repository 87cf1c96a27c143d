use burrow_core::{CoreError, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("short code not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidUrl(message) => Self::InvalidUrl(message),
            // A code that does not decode to a store id cannot name a record.
            CoreError::MalformedCode(_) | CoreError::InvalidRecordId(_) => Self::NotFound,
        }
    }
}
