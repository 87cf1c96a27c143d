use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub original_url: String,
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}
