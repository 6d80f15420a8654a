use crate::services::market::Direction;
use crate::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};

/// 当日市场摘要：指数 + 两市涨跌家数 + 成交额
pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.refresh_summary().await)
}

/// 涨幅榜
pub async fn get_hot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.market().movers(Direction::Gainers).await)
}

/// 跌幅榜
pub async fn get_fall(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.market().movers(Direction::Losers).await)
}

pub async fn get_series(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.series().await.columns())
}
