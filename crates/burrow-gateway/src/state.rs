use std::sync::Arc;

use axum::http::header::HOST;
use axum::http::{HeaderMap, Uri};
use burrow_shortener::Shortener;

use crate::error::StatusPolicy;

const FALLBACK_HOST: &str = "localhost";

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    public_host: Option<String>,
    status_policy: StatusPolicy,
}

impl AppState {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        public_host: Option<String>,
        status_policy: StatusPolicy,
    ) -> Self {
        Self {
            shortener,
            public_host,
            status_policy,
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Picks the host that goes into generated links: the configured public
    /// host, else the request's `Host` header, else the URI authority.
    pub fn link_host(&self, headers: &HeaderMap, uri: &Uri) -> String {
        if let Some(host) = &self.public_host {
            return host.clone();
        }

        headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
            .or_else(|| uri.authority().map(|authority| authority.as_str()))
            .unwrap_or(FALLBACK_HOST)
            .to_string()
    }
}
