//! Real-time push endpoint.
//!
//! `GET /ws` upgrades to a WebSocket and streams every newly stored entry as a
//! text frame `{"event":"newLog","data":<entry>}`. Client messages are
//! ignored; the subscription ends when the client disconnects.

use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use shared::notify::Subscription;

/// Creates the WebSocket routes with application state.
pub fn ws_routes(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state)
}

/// Handler for WebSocket upgrades.
///
/// The subscription is taken before the upgrade completes so that no entry
/// stored after the handshake is missed.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let subscription = state.notifier().subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, subscription))
}

async fn stream_events(mut socket: WebSocket, mut subscription: Subscription) {
    let id = subscription.id();
    tracing::info!(subscription = id, "Real-time client connected");

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode event");
                        continue;
                    }
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::info!(subscription = id, "Real-time client disconnected");
}
