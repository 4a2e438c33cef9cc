//! # routes::game
//!
//! Clock control for the dashboard.
//!
//! | Method | Path               | Description                               |
//! |--------|--------------------|-------------------------------------------|
//! | POST   | `/api/game/start`  | Reset everything and start the countdown  |
//! | POST   | `/api/game/stop`   | End the running game early                |
//! | GET    | `/api/game/status` | Quotes, balance, holdings, live P/L       |
//! | GET    | `/api/health`      | Liveness                                  |

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::atomic::Ordering;

use crate::{
    engine::driver::spawn_game_loop,
    error::AppError,
    events::WsEvent,
    state::SharedState,
};

// ─── POST /api/game/start ─────────────────────────────────────────────────────

pub async fn start_game(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let (game_id, tick, duration_secs, starting_balance) = {
        let mut session = state.session.write().await;
        let game_id = session.start()?;
        let status = session.status();
        (game_id, session.current_tick(), status.duration_secs, status.starting_balance)
    };

    state.broadcast(&WsEvent::GameStarted {
        game_id,
        duration_secs,
        starting_balance,
        tick,
    });

    spawn_game_loop(state.clone(), game_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok":               true,
            "game_id":          game_id,
            "duration_secs":    duration_secs,
            "starting_balance": starting_balance,
        })),
    ))
}

// ─── POST /api/game/stop ──────────────────────────────────────────────────────

pub async fn stop_game(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.session.write().await.stop()?;

    state.broadcast(&WsEvent::GameEnded {
        summary: Box::new(summary.clone()),
    });

    Ok(Json(json!({ "ok": true, "summary": summary })))
}

// ─── GET /api/game/status ─────────────────────────────────────────────────────

pub async fn get_status(State(state): State<SharedState>) -> impl IntoResponse {
    let status = state.session.read().await.status();
    Json(json!({ "ok": true, "status": status }))
}

// ─── GET /api/health ──────────────────────────────────────────────────────────

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "ok":          true,
        "status":      "healthy",
        "tick_count":  state.tick_count.load(Ordering::Relaxed),
        "trade_count": state.trade_count.load(Ordering::Relaxed),
    }))
}
