use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Length of a store-assigned record id.
pub const RECORD_ID_LEN: usize = 24;

/// Identifier assigned by the store when a [`UrlRecord`] is created.
///
/// Ids are always 24 lowercase hexadecimal characters. Anything else cannot
/// name a record, so it is rejected before any store lookup happens.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Parses a record id, checking length and alphabet.
    pub fn parse(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();

        if id.len() != RECORD_ID_LEN {
            return Err(CoreError::InvalidRecordId(format!(
                "expected {} characters, got {}",
                RECORD_ID_LEN,
                id.len()
            )));
        }

        if !id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(CoreError::InvalidRecordId(format!(
                "must contain only lowercase hex digits: '{}'",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Creates a `RecordId` without validation.
    ///
    /// Use this only for ids minted by a store adapter that formats them
    /// as 24 lowercase hex digits by construction.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RecordId").field(&self.0).finish()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// A stored URL record.
///
/// Records are created once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The id assigned by the store.
    pub id: RecordId,
    /// The original URL that was shortened.
    pub original_url: String,
}
