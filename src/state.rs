//! # state
//!
//! The shared application state handed to every Axum handler and to the
//! tick loop.
//!
//! The whole game lives in one [`GameSession`] behind an async `RwLock`.
//! Ticks and trades both take the write lock, so every mutation is
//! serialized; status/chart reads share the read lock.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::config::SimConfig;
use crate::engine::session::GameSession;
use crate::events::WsEvent;

// ─── AppState ─────────────────────────────────────────────────────────────────

/// Top-level shared state injected into every Axum handler.
pub struct AppState {
    pub config: Arc<SimConfig>,

    pub session: RwLock<GameSession>,

    /// Game events, pre-serialized. Subscribing is how a UI registers its
    /// per-tick callback.
    pub broadcast_tx: broadcast::Sender<String>,

    // ── Metrics ───────────────────────────────────────────────────────────────
    pub tick_count:  AtomicU64,
    pub trade_count: AtomicU64,
}

impl AppState {
    pub fn new(config: SimConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(256);

        Self {
            session:     RwLock::new(GameSession::new(&config)),
            config:      Arc::new(config),
            broadcast_tx,
            tick_count:  AtomicU64::new(0),
            trade_count: AtomicU64::new(0),
        }
    }

    /// Send an event to every WebSocket client.
    /// No listeners is not an error.
    pub fn broadcast(&self, event: &WsEvent) {
        let _ = self.broadcast_tx.send(event.to_json());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.broadcast_tx.subscribe()
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: SimConfig) -> SharedState {
    Arc::new(AppState::new(config))
}
