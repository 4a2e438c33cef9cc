//! # routes::monitor
//!
//! Live feed for the chart.
//!
//! | Method    | Path                | Description                           |
//! |-----------|---------------------|---------------------------------------|
//! | GET (WS)  | `/ws/game`          | Snapshot, then every game event       |
//! | GET       | `/api/market/chart` | Current price window                  |

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Json,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{debug, info};

use crate::state::SharedState;

// ─── WebSocket Handler ────────────────────────────────────────────────────────

/// Upgrade HTTP → WebSocket and subscribe to the broadcast channel.
/// Every [`WsEvent`](crate::events::WsEvent) arrives as a JSON text frame.
pub async fn ws_game(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    // subscribe before the snapshot so no event falls in between
    let mut rx = state.subscribe();
    let (mut sender, mut receiver) = socket.split();

    info!("🔌 WebSocket client connected");

    let snapshot = {
        let session = state.session.read().await;
        json!({
            "event":  "SNAPSHOT",
            "status": session.status(),
            "chart":  session.chart(),
        })
        .to_string()
    };

    if sender.send(Message::Text(snapshot)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(json_str) => {
                        if sender.send(Message::Text(json_str)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!("WS client lagged, skipped {n} events");
                    }
                    Err(_) => break,
                }
            }

            result = receiver.next() => {
                match result {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    info!("🔌 WebSocket client disconnected");
}

// ─── GET /api/market/chart ────────────────────────────────────────────────────

pub async fn get_chart(State(state): State<SharedState>) -> impl IntoResponse {
    let session = state.session.read().await;
    let ticks = session.chart();
    Json(json!({
        "ok":        true,
        "count":     ticks.len(),
        "situation": session.regime().situation(),
        "ticks":     ticks,
    }))
}
