pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod models;
pub mod series;
pub mod services;
pub mod state;
pub mod views;

use axum::{
    Router,
    routing::{get, get_service, post},
};
use state::AppState;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/metals", get(handlers::page::metals_page))
        .route("/partials/board", get(handlers::page::board_partial))
        .route("/partials/metals", get(handlers::page::metals_partial))
        .route("/health", get(handlers::health::get_health))
        .route("/api/summary", get(handlers::market::get_summary))
        .route("/api/hot", get(handlers::market::get_hot))
        .route("/api/fall", get(handlers::market::get_fall))
        .route("/api/series", get(handlers::market::get_series))
        .route("/api/metals", get(handlers::metals::get_metals))
        .route(
            "/api/metals/polling",
            post(handlers::metals::start_polling).delete(handlers::metals::stop_polling),
        )
        .route("/api/metals/currency", post(handlers::metals::set_currency))
        .route("/ws/metals", get(handlers::ws::ws_metals))
        .nest_service("/static", get_service(ServeDir::new("static")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
