//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the record model, the repository contract, the short
//! code encoding and the URL validator shared by the storage adapters, the
//! shortener service and the HTTP gateway.

pub mod error;
pub mod record;
pub mod repository;
pub mod shortcode;
pub mod validate;

pub use error::{CoreError, StorageError};
pub use record::{RecordId, UrlRecord, RECORD_ID_LEN};
pub use repository::{ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use validate::validate_url;
