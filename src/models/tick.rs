//! # models::tick
//!
//! Defines [`Tick`], one simulated quote of the Mustermann AG stock, and
//! [`PriceWindow`], the bounded series of recent ticks the chart renders.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quotes the chart starts with before the first simulated tick.
/// Stored as `(bid, ask)` pairs.
pub const OPENING_SERIES: [(f64, f64); 7] = [
    (99.00, 100.00),
    (99.50, 100.50),
    (100.00, 101.00),
    (100.50, 101.50),
    (100.00, 101.00),
    (99.50, 100.50),
    (99.00, 100.00),
];

// ─── Tick ─────────────────────────────────────────────────────────────────────

/// A single simulated price tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Monotonic position of this tick within the current game.
    pub sequence_index: u64,

    /// Price the player buys at.
    pub bid: f64,

    /// Price the player sells at. Never below `bid`.
    pub ask: f64,

    /// Wall-clock time the tick was produced.
    pub time: DateTime<Utc>,
}

impl Tick {
    pub fn new(sequence_index: u64, bid: f64, ask: f64) -> Self {
        Self {
            sequence_index,
            bid,
            ask,
            time: Utc::now(),
        }
    }
}

// ─── PriceWindow ──────────────────────────────────────────────────────────────

/// Sliding window of the most recent ticks, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct PriceWindow {
    capacity: usize,
    ticks: VecDeque<Tick>,
}

impl PriceWindow {
    /// Empty window. A capacity of 0 is bumped to 1 so `latest()` always
    /// has something to return once a tick was pushed. Storage grows with
    /// the ticks actually pushed, not with `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            ticks: VecDeque::new(),
        }
    }

    /// Window pre-filled with [`OPENING_SERIES`].
    pub fn opening(capacity: usize) -> Self {
        let mut window = Self::new(capacity);
        for (i, &(bid, ask)) in OPENING_SERIES.iter().enumerate() {
            window.push(Tick::new(i as u64, bid, ask));
        }
        window
    }

    pub fn push(&mut self, tick: Tick) {
        if self.ticks.len() >= self.capacity {
            self.ticks.pop_front();
        }
        self.ticks.push_back(tick);
    }

    pub fn latest(&self) -> Option<&Tick> {
        self.ticks.back()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }

    /// Cloned copy of the ticks, for handing out without holding the lock.
    pub fn to_vec(&self) -> Vec<Tick> {
        self.ticks.iter().copied().collect()
    }
}
