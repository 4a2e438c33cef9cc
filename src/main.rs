//! # Tradesim — Educational Stock-Trading Game Server
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  POST /api/game/start|stop   ┌──────────────────────────┐
//!  │  Dashboard   │ ────────────────────────────▶│ AppState                 │
//!  │  (browser)   │  POST /api/trade/buy|sell    │ └─ RwLock<GameSession>   │
//!  └──────────────┘ ────────────────────────────▶│    ├─ PriceEngine        │
//!         ▲                                      │    ├─ PortfolioLedger    │
//!         │        ws://host/ws/game             │    └─ GameClock          │
//!         └──────────────────────────────────────│ broadcast_tx ◀─ tick loop│
//!                                                └──────────────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! See `tradesim::config` for the full list. The most common:
//!
//! | Variable                 | Default          | Description               |
//! |--------------------------|------------------|---------------------------|
//! | `BIND_ADDR`              | `0.0.0.0:3000`   | Address Axum listens on   |
//! | `SIM_GAME_DURATION_SECS` | `600`            | Game length               |
//! | `RUST_LOG`               | `tradesim=debug` | Tracing filter            |

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tradesim::{config::SimConfig, routes::build_router, state::build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — real env vars win) ───────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("tradesim=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════╗
  ║        TRADESIM — Mustermann AG Trading       ║
  ║   Price Walk · Commission · Ledger · Clock    ║
  ╚═══════════════════════════════════════════════╝"#);

    // ── 3. Configuration ──────────────────────────────────────────────────────
    let config = SimConfig::from_env()?;
    info!(
        balance = config.starting_balance,
        duration_secs = config.game_duration_secs,
        tick = ?config.tick_interval,
        seeded = config.seed.is_some(),
        "⚙️ Simulator configured"
    );
    let addr: SocketAddr = config.bind_addr.parse()?;

    // ── 4. Shared state + router ──────────────────────────────────────────────
    let app = build_router(build_state(config));

    // ── 5. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 Tradesim server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
