use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_shortener::ShortenerError;
use clap::ValueEnum;
use tracing::{debug, error};

pub const INVALID_URL_MESSAGE: &str =
    "Invalid URL format. Make sure you have the correct protocol and a valid address.";
pub const NOT_FOUND_MESSAGE: &str = "This URL is not in the database.";
pub const STORE_UNAVAILABLE_MESSAGE: &str = "The URL store is temporarily unavailable.";

pub type Result<T> = std::result::Result<T, AppError>;

/// How client errors are reported on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusPolicy {
    /// Invalid URLs and unknown codes answer `200 OK` with an error body.
    #[default]
    Compat,
    /// Invalid URLs answer `400`, unknown codes answer `404`.
    Strict,
}

impl StatusPolicy {
    fn client_error(self, strict: StatusCode) -> StatusCode {
        match self {
            StatusPolicy::Compat => StatusCode::OK,
            StatusPolicy::Strict => strict,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    error: ShortenerError,
    policy: StatusPolicy,
}

impl AppError {
    pub fn new(error: ShortenerError, policy: StatusPolicy) -> Self {
        Self { error, policy }
    }

    pub fn not_found(policy: StatusPolicy) -> Self {
        Self::new(ShortenerError::NotFound, policy)
    }

    /// Status code and message sent for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.error {
            ShortenerError::InvalidUrl(_) => (
                self.policy.client_error(StatusCode::BAD_REQUEST),
                INVALID_URL_MESSAGE,
            ),
            ShortenerError::NotFound => (
                self.policy.client_error(StatusCode::NOT_FOUND),
                NOT_FOUND_MESSAGE,
            ),
            ShortenerError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, STORE_UNAVAILABLE_MESSAGE)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self.error {
            ShortenerError::StoreUnavailable(source) => {
                error!(error = %source, "url store failure");
            }
            ShortenerError::InvalidUrl(reason) => {
                debug!(reason = %reason, "rejected url");
            }
            ShortenerError::NotFound => {}
        }

        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
