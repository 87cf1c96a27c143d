use crate::error::CoreError;
use crate::record::RecordId;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use std::fmt::Display;

/// Encodes an id string into a URL-path-safe short code.
///
/// Uses the unpadded URL-safe base64 alphabet (`A-Z`, `a-z`, `0-9`, `-`, `_`),
/// so the result never needs percent-escaping.
pub fn encode(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Decodes a short code back into the id string it was produced from.
///
/// Fails with [`CoreError::MalformedCode`] when the input contains characters
/// outside the alphabet, has an impossible length, or does not decode to UTF-8.
pub fn decode(code: &str) -> Result<String, CoreError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(code)
        .map_err(|e| CoreError::MalformedCode(format!("'{}': {}", code, e)))?;

    String::from_utf8(bytes)
        .map_err(|_| CoreError::MalformedCode(format!("'{}' does not decode to text", code)))
}

/// The externally visible code of a stored record.
///
/// A short code is never stored. It is computed from the record id whenever
/// a link is handed out and decoded again on every visit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates the short code for a record id.
    pub fn from_id(id: &RecordId) -> Self {
        Self(encode(id.as_str()))
    }

    /// Wraps a code received from a client. No decoding happens here.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Decodes the code into a record id.
    ///
    /// Returns [`CoreError::MalformedCode`] if the code cannot be decoded and
    /// [`CoreError::InvalidRecordId`] if it decodes to something that is not
    /// shaped like a store id.
    pub fn decode_id(&self) -> Result<RecordId, CoreError> {
        RecordId::parse(decode(&self.0)?)
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
