use crate::error::Result;
use async_trait::async_trait;
use burrow_core::{ShortCode, UrlRecord};

/// The outcome of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    /// The full link handed back to the client.
    pub short_url: String,
    /// The code embedded in `short_url`.
    pub short_code: ShortCode,
    /// The stored record the code points at.
    pub record: UrlRecord,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short link for `raw_url`, creating a record only if none
    /// exists yet for that exact URL.
    ///
    /// `host_for_links` is the host placed in front of the code, e.g.
    /// `short.ly` yields `https://short.ly/<code>`.
    async fn create(&self, raw_url: &str, host_for_links: &str) -> Result<Shortened>;

    /// Resolves a short code to the original URL it was created for.
    async fn resolve(&self, code: &str) -> Result<String>;
}
