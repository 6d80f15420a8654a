use crate::error::{AppError, normalize_currency};
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct StartPolling {
    /// Raw form value; clamped server-side
    #[serde(default)]
    pub interval: String,
    pub currency: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrencyChange {
    pub currency: String,
}

pub async fn get_metals(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metals().snapshot().await)
}

pub async fn start_polling(
    State(state): State<AppState>,
    Json(req): Json<StartPolling>,
) -> Result<impl IntoResponse, AppError> {
    let currency = req
        .currency
        .as_deref()
        .map(normalize_currency)
        .transpose()?;
    let api_key = req.api_key.filter(|key| !key.trim().is_empty());

    let interval = state
        .metals()
        .start(&req.interval, currency, api_key)
        .await;
    Ok(Json(json!({ "interval": interval })))
}

pub async fn stop_polling(State(state): State<AppState>) -> impl IntoResponse {
    state.metals().stop().await;
    StatusCode::NO_CONTENT
}

pub async fn set_currency(
    State(state): State<AppState>,
    Json(req): Json<CurrencyChange>,
) -> Result<impl IntoResponse, AppError> {
    let currency = normalize_currency(&req.currency)?;
    state.metals().set_currency(currency.clone()).await;
    Ok(Json(json!({ "currency": currency })))
}
