use crate::state::AppState;
use crate::views::{
    self,
    board::{Board, BoardPage, BoardProps},
    metals::{MetalsBoardProps, MetalsBoardView, MetalsPage},
};
use axum::extract::State;
use axum::response::Html as AxumHtml;

/// Dashboard with a fresh board, like the page's first refresh.
pub async fn index(State(state): State<AppState>) -> AxumHtml<String> {
    let data = state.refresh_board().await;
    AxumHtml(views::render_page::<BoardPage>(BoardProps { data }).await)
}

pub async fn board_partial(State(state): State<AppState>) -> AxumHtml<String> {
    let data = state.refresh_board().await;
    AxumHtml(views::render::<Board>(BoardProps { data }).await)
}

pub async fn metals_page(State(state): State<AppState>) -> AxumHtml<String> {
    let snapshot = state.metals().snapshot().await;
    AxumHtml(views::render_page::<MetalsPage>(MetalsBoardProps { snapshot }).await)
}

pub async fn metals_partial(State(state): State<AppState>) -> AxumHtml<String> {
    let snapshot = state.metals().snapshot().await;
    AxumHtml(views::render::<MetalsBoardView>(MetalsBoardProps { snapshot }).await)
}
