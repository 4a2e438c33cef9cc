//! # events
//!
//! Defines [`WsEvent`] — every event the game broadcasts to WebSocket
//! clients.
//!
//! Events go through a `tokio::sync::broadcast::Sender<String>` as
//! pre-serialized JSON so subscribers never need `Clone` on the payload.

use serde::Serialize;
use uuid::Uuid;

use crate::engine::session::GameSummary;
use crate::models::{MarketSituation, Order, Side, Tick};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsEvent {
    /// Fresh game — the chart restarts from the opening series.
    GameStarted {
        game_id: Uuid,
        duration_secs: u64,
        starting_balance: f64,
        tick: Tick,
    },

    /// One clock second passed.
    Tick {
        tick: Tick,
        situation: MarketSituation,
        remaining_secs: u64,
        profit_loss: f64,
    },

    OrderFilled {
        order: Box<Order>,
    },

    OrderRejected {
        side: Side,
        requested: i64,
        code: &'static str,
        reason: String,
    },

    GameEnded {
        summary: Box<GameSummary>,
    },
}

impl WsEvent {
    /// Serialize for sending over the WebSocket.
    #[inline]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"event":"SERIALIZATION_ERROR"}"#.to_string())
    }
}
