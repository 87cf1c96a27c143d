//! Store adapters for the Burrow URL shortener.
//!
//! [`InMemoryRepository`] keeps records in process memory and is meant for
//! local development and tests. [`MySqlRepository`] persists them in MySQL.
//! Wrap either one in [`TimeoutRepository`] to bound every store call.

pub mod memory;
pub mod mysql;
pub mod timeout;

pub use burrow_core::{ReadRepository, RecordId, Repository, StorageError, UrlRecord};
pub use memory::InMemoryRepository;
pub use mysql::{MySqlRepository, MySqlSettings};
pub use timeout::TimeoutRepository;
