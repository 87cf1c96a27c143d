//! Shallow validation of URLs submitted for shortening.
//!
//! The check only rejects input that is obviously not an absolute web
//! address. No DNS lookups or reachability checks are performed.

use crate::error::CoreError;
use url::Url;

/// Validates that `candidate` is an absolute URL of the form
/// `scheme://host[/path][?query]` whose host contains at least one dot.
pub fn validate_url(candidate: &str) -> Result<(), CoreError> {
    // The parser drops surrounding whitespace, the authority check below does not.
    if candidate.trim() != candidate {
        return Err(CoreError::InvalidUrl(format!(
            "'{}' has leading or trailing whitespace",
            candidate
        )));
    }

    let url = Url::parse(candidate)
        .map_err(|e| CoreError::InvalidUrl(format!("'{}': {}", candidate, e)))?;

    let scheme = url.scheme();
    if scheme.is_empty() {
        return Err(CoreError::InvalidUrl(format!(
            "'{}' has no scheme",
            candidate
        )));
    }

    // The parser lowercases the scheme, so compare by length only and check
    // the raw text for the authority marker.
    let has_authority = candidate
        .get(scheme.len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if !has_authority {
        return Err(CoreError::InvalidUrl(format!(
            "'{}' must use the {}:// form",
            candidate, scheme
        )));
    }

    let host = url.host_str().unwrap_or_default();
    if host.split('.').count() < 2 {
        return Err(CoreError::InvalidUrl(format!(
            "host '{}' must contain at least one dot",
            host
        )));
    }

    Ok(())
}
