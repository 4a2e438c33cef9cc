//! Tradesim — a bid/ask random-walk price feed, a capped commission
//! schedule, a portfolio ledger and a countdown clock, composed into a
//! single-player trading game and served over HTTP + WebSocket.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod routes;
pub mod state;
