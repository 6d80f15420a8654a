use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use tokio::select;

pub async fn ws_metals(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let metals = state.metals();
    let mut rx = metals.subscribe();

    // Current board first so a fresh page is in sync.
    if let Ok(txt) = serde_json::to_string(&metals.snapshot().await) {
        if socket.send(Message::Text(txt.into())).await.is_err() {
            return;
        }
    }

    loop {
        select! {
            msg = rx.recv() => {
                match msg {
                    Ok(snapshot) => {
                        let Ok(txt) = serde_json::to_string(&snapshot) else { continue };
                        if socket.send(Message::Text(txt.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "metals subscriber lagging");
                        continue;
                    }
                    Err(_) => break,
                }
            }
            // Client -> server: drained, only close matters
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => break,
                }
            }
        }
    }
}
