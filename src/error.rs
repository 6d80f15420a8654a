use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Request errors surfaced by the JSON API.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unsupported currency: {0:?}")]
    InvalidCurrency(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidCurrency(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Normalizes an ISO-4217 style code such as `usd` to `USD`.
pub fn normalize_currency(raw: &str) -> Result<String, AppError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(AppError::InvalidCurrency(raw.to_string()))
    }
}
