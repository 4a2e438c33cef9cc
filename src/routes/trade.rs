//! # routes::trade
//!
//! Buy/sell against the current quote.
//!
//! A refused order is not an HTTP error: the handler answers `200` with
//! `{ "ok": false, "action": "REJECTED", "code", "reason" }` and the ledger
//! is left untouched.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use tracing::debug;

use crate::{error::AppError, events::WsEvent, models::Side, state::SharedState};

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    /// Signed so that zero/negative input from a form is a rejection rather
    /// than a deserialization error.
    pub shares: i64,
}

/// POST /api/trade/buy — fills at the current bid
pub async fn buy_shares(
    State(state): State<SharedState>,
    payload: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = parse_request(payload)?;
    Ok(execute(&state, Side::Buy, req.shares).await)
}

/// POST /api/trade/sell — fills at the current bid, clamped to holdings
pub async fn sell_shares(
    State(state): State<SharedState>,
    payload: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = parse_request(payload)?;
    Ok(execute(&state, Side::Sell, req.shares).await)
}

fn parse_request(
    payload: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<TradeRequest, AppError> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn execute(state: &SharedState, side: Side, requested: i64) -> (StatusCode, Json<Value>) {
    let shares = u64::try_from(requested).unwrap_or(0);

    let (result, cash_balance, share_holdings) = {
        let mut session = state.session.write().await;
        let result = match side {
            Side::Buy => session.buy(shares),
            Side::Sell => session.sell(shares),
        };
        let ledger = session.ledger();
        (result, ledger.cash_balance(), ledger.share_holdings())
    };

    match result {
        Ok(order) => {
            state.trade_count.fetch_add(1, Ordering::Relaxed);
            state.broadcast(&WsEvent::OrderFilled {
                order: Box::new(order.clone()),
            });
            (
                StatusCode::OK,
                Json(json!({
                    "ok":             true,
                    "action":         "FILLED",
                    "order":          order,
                    "cash_balance":   cash_balance,
                    "share_holdings": share_holdings,
                })),
            )
        }
        Err(rejection) => {
            debug!(%side, requested, %rejection, "order rejected");
            state.broadcast(&WsEvent::OrderRejected {
                side,
                requested,
                code: rejection.code(),
                reason: rejection.to_string(),
            });
            (
                StatusCode::OK,
                Json(json!({
                    "ok":     false,
                    "action": "REJECTED",
                    "code":   rejection.code(),
                    "reason": rejection.to_string(),
                })),
            )
        }
    }
}

/// GET /api/trade/orders — every order of the current game
pub async fn get_orders(State(state): State<SharedState>) -> impl IntoResponse {
    let session = state.session.read().await;
    let orders = session.orders();
    Json(json!({
        "ok":                true,
        "count":             orders.len(),
        "total_commissions": session.ledger().total_commissions(),
        "orders":            orders,
    }))
}
