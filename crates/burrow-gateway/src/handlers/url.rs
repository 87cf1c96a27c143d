use crate::error::{AppError, Result};
use crate::model::CreateUrlResponse;
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::StorageError;
use burrow_shortener::ShortenerError;
use tracing::{debug, warn};

const CREATE_PREFIX: &str = "/new/";

/// `GET /new/<url>`: shortens everything after `/new/`, query string
/// included, exactly as it was sent. A bare `/new/` is an unknown path.
pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<CreateUrlResponse>> {
    let raw_url = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .and_then(|path_and_query| path_and_query.strip_prefix(CREATE_PREFIX))
        .unwrap_or_default();
    if raw_url.is_empty() {
        return Err(AppError::not_found(state.status_policy()));
    }
    let host = state.link_host(&headers, &uri);

    let shortened = state
        .shortener()
        .create(raw_url, &host)
        .await
        .map_err(|e| AppError::new(e, state.status_policy()))?;

    Ok(Json(CreateUrlResponse {
        original_url: shortened.record.original_url,
        short_url: shortened.short_url,
    }))
}

/// `GET /<code>`: redirects to the original URL. A segment that does not
/// percent-decode to text cannot be a code and is answered as not found.
pub async fn resolve_url_handler(
    State(state): State<AppState>,
    short_code: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let policy = state.status_policy();
    let short_code = match short_code {
        Ok(Path(short_code)) => short_code,
        Err(rejection) => {
            debug!(error = %rejection, "short code segment is not text");
            return Err(AppError::not_found(policy));
        }
    };
    let original_url = state
        .shortener()
        .resolve(&short_code)
        .await
        .map_err(|e| AppError::new(e, policy))?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|e| {
        warn!(code = %short_code, error = %e, "stored url is not a valid Location header");
        AppError::new(
            ShortenerError::StoreUnavailable(StorageError::InvalidData(e.to_string())),
            policy,
        )
    })?;

    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}

/// Any path no route claims is answered like an unknown code.
pub async fn not_found_handler(State(state): State<AppState>) -> AppError {
    AppError::not_found(state.status_policy())
}
