//! HTTP + WebSocket surface of the game.

pub mod game;
pub mod monitor;
pub mod trade;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)   // the dashboard is served from its own dev server
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Clock ─────────────────────────────────────────────────────────────
        .route("/api/game/start",   post(game::start_game))
        .route("/api/game/stop",    post(game::stop_game))
        .route("/api/game/status",  get(game::get_status))
        .route("/api/health",       get(game::health_check))
        // ── Trading ───────────────────────────────────────────────────────────
        .route("/api/trade/buy",    post(trade::buy_shares))
        .route("/api/trade/sell",   post(trade::sell_shares))
        .route("/api/trade/orders", get(trade::get_orders))
        // ── Market feed ───────────────────────────────────────────────────────
        .route("/api/market/chart", get(monitor::get_chart))
        .route("/ws/game",          get(monitor::ws_game))
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
