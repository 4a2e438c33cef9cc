//! # models::order
//!
//! Defines [`Order`] — one executed buy or sell — and [`LedgerState`], the
//! player's cash/holdings snapshot.
//!
//! Orders are never mutated after the ledger records them; the history is
//! append-only until the next game starts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Side ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// ─── Order ────────────────────────────────────────────────────────────────────

/// An executed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    pub side: Side,
    /// Shares actually filled (after clamping for sells).
    pub shares: u64,
    pub price_per_share: f64,
    pub commission: f64,
    /// Sequence index of the tick the order was filled against.
    pub tick_index: u64,
    pub executed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(side: Side, shares: u64, price_per_share: f64, commission: f64, tick_index: u64) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            side,
            shares,
            price_per_share,
            commission,
            tick_index,
            executed_at: Utc::now(),
        }
    }
}

// ─── LedgerState ──────────────────────────────────────────────────────────────

/// Snapshot of the player's account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerState {
    pub cash_balance: f64,
    pub share_holdings: u64,
    pub order_history: Vec<Order>,
}
