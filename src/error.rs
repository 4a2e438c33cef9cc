//! # error
//!
//! Centralised error types.
//!
//! * [`TradeRejection`] — a buy/sell the ledger refused. Not a failure of the
//!   server: handlers answer `200` with `ok: false` so the UI can show why.
//! * [`ClockError`] — an illegal game-clock transition.
//! * [`AppError`] — every handler returns `Result<_, AppError>`; the
//!   `IntoResponse` impl turns it into a structured JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// ─── TradeRejection ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeRejection {
    #[error("share count must be positive")]
    NonPositiveShares,

    #[error("insufficient funds: order needs {required:.2}, balance is {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("no shares held to sell")]
    NoHoldings,

    #[error("no valid quote to trade against: {0}")]
    InvalidPrice(f64),

    #[error("no game is running")]
    GameNotRunning,
}

impl TradeRejection {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            TradeRejection::NonPositiveShares => "NON_POSITIVE_SHARES",
            TradeRejection::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TradeRejection::NoHoldings => "NO_HOLDINGS",
            TradeRejection::InvalidPrice(_) => "INVALID_PRICE",
            TradeRejection::GameNotRunning => "GAME_NOT_RUNNING",
        }
    }
}

// ─── ClockError ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("a game is already running")]
    AlreadyRunning,

    #[error("no game is running")]
    NotRunning,
}

// ─── AppError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be read as an order.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The game clock is in the wrong phase for this request.
    #[error("Conflict: {0}")]
    Conflict(#[from] ClockError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
