//! # engine::session
//!
//! [`GameSession`] ties the price engine, ledger and clock together. It is
//! the only thing that mutates game state; the server keeps one behind a
//! lock and drives it from the tick loop and the trade handlers.
//!
//! Both sides fill at the current **bid**, the same quote holdings are
//! valued at. A round trip on an unchanged quote only loses commissions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::engine::clock::{ClockPhase, GameClock};
use crate::engine::ledger::PortfolioLedger;
use crate::engine::price::PriceEngine;
use crate::error::{ClockError, TradeRejection};
use crate::models::{MarketSituation, Order, PriceWindow, RegimeState, Tick};

// ─── Outputs ──────────────────────────────────────────────────────────────────

/// Final result of a game, produced when the clock ends or the player stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub game_id: Uuid,
    pub profit_loss: f64,
    pub is_profit: bool,
    pub total_commissions: f64,
    pub cash_balance: f64,
    pub share_holdings: u64,
    pub order_count: usize,
    pub final_bid: f64,
    pub final_ask: f64,
    /// `true` when stopped before the countdown ran out.
    pub ended_early: bool,
    pub ended_at: DateTime<Utc>,
}

/// What one clock second did.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The clock was not running; nothing happened.
    Idle,
    Ticked {
        tick: Tick,
        situation: MarketSituation,
        remaining_secs: u64,
        profit_loss: f64,
    },
    /// The last tick of the game.
    Ended {
        tick: Tick,
        situation: MarketSituation,
        summary: GameSummary,
    },
}

/// Snapshot for the status endpoint and WebSocket greeting.
#[derive(Debug, Clone, Serialize)]
pub struct GameStatus {
    pub game_id: Uuid,
    pub phase: ClockPhase,
    pub remaining_secs: u64,
    pub duration_secs: u64,
    pub current_bid: f64,
    pub current_ask: f64,
    pub situation: MarketSituation,
    pub starting_balance: f64,
    pub cash_balance: f64,
    pub share_holdings: u64,
    pub total_commissions: f64,
    pub profit_loss: f64,
    pub is_profit: bool,
    pub last_summary: Option<GameSummary>,
}

// ─── GameSession ──────────────────────────────────────────────────────────────

pub struct GameSession {
    game_id: Uuid,
    chart_window: usize,
    engine: PriceEngine,
    window: PriceWindow,
    regime: RegimeState,
    ledger: PortfolioLedger,
    clock: GameClock,
    last_summary: Option<GameSummary>,
}

impl GameSession {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            chart_window: config.chart_window,
            engine: PriceEngine::new(config.walk.clone(), config.seed),
            window: PriceWindow::opening(config.chart_window),
            regime: RegimeState::default(),
            ledger: PortfolioLedger::new(config.starting_balance),
            clock: GameClock::new(config.game_duration_secs),
            last_summary: None,
        }
    }

    // ─── Clock control ────────────────────────────────────────────────────────

    /// Reset everything and start a new countdown. Returns the new game id.
    pub fn start(&mut self) -> Result<Uuid, ClockError> {
        self.clock.start()?;
        self.game_id = Uuid::new_v4();
        self.window = PriceWindow::opening(self.chart_window);
        self.regime = RegimeState::default();
        self.ledger.reset();

        info!(
            game_id = %self.game_id,
            duration_secs = self.clock.duration_secs(),
            balance = self.ledger.cash_balance(),
            "🎮 Game started"
        );
        Ok(self.game_id)
    }

    /// End the running game early.
    pub fn stop(&mut self) -> Result<GameSummary, ClockError> {
        self.clock.stop()?;
        let summary = self.finalize(true);
        info!(game_id = %self.game_id, profit_loss = summary.profit_loss, "🛑 Game stopped early");
        Ok(summary)
    }

    /// One clock second: a new price tick, then the countdown moves.
    pub fn advance(&mut self) -> Advance {
        if !self.clock.is_running() {
            return Advance::Idle;
        }

        let tick = self.next_tick();

        match self.clock.tick() {
            ClockPhase::Ended => {
                let summary = self.finalize(false);
                info!(
                    game_id = %self.game_id,
                    profit_loss = summary.profit_loss,
                    orders = summary.order_count,
                    "🏁 Game over"
                );
                Advance::Ended { tick, situation: self.regime.situation(), summary }
            }
            _ => Advance::Ticked {
                tick,
                situation: self.regime.situation(),
                remaining_secs: self.clock.remaining_secs(),
                profit_loss: self.ledger.profit_loss(tick.bid),
            },
        }
    }

    fn next_tick(&mut self) -> Tick {
        let prev = self.current_tick();
        let (tick, regime) = self.engine.tick(&prev, self.regime);
        self.window.push(tick);
        self.regime = regime;
        tick
    }

    fn finalize(&mut self, ended_early: bool) -> GameSummary {
        let tick = self.current_tick();
        let profit_loss = self.ledger.profit_loss(tick.bid);
        let summary = GameSummary {
            game_id: self.game_id,
            profit_loss,
            is_profit: profit_loss >= 0.0,
            total_commissions: self.ledger.total_commissions(),
            cash_balance: self.ledger.cash_balance(),
            share_holdings: self.ledger.share_holdings(),
            order_count: self.ledger.orders().len(),
            final_bid: tick.bid,
            final_ask: tick.ask,
            ended_early,
            ended_at: Utc::now(),
        };
        self.last_summary = Some(summary.clone());
        summary
    }

    // ─── Trading ──────────────────────────────────────────────────────────────

    /// Buy at the current bid.
    pub fn buy(&mut self, shares: u64) -> Result<Order, TradeRejection> {
        let tick = self.tradable_tick()?;
        self.ledger.buy(shares, tick.bid, tick.sequence_index)
    }

    /// Sell at the current bid; clamps to holdings.
    pub fn sell(&mut self, shares: u64) -> Result<Order, TradeRejection> {
        let tick = self.tradable_tick()?;
        self.ledger.sell(shares, tick.bid, tick.sequence_index)
    }

    fn tradable_tick(&self) -> Result<Tick, TradeRejection> {
        if !self.clock.is_running() {
            warn!(phase = ?self.clock.phase(), "order outside a running game");
            return Err(TradeRejection::GameNotRunning);
        }
        Ok(self.current_tick())
    }

    // ─── Views ────────────────────────────────────────────────────────────────

    /// Latest quote. The window is never empty: it starts from the opening
    /// series and only ever grows or slides.
    pub fn current_tick(&self) -> Tick {
        self.window.latest().copied().unwrap_or_else(|| Tick::new(0, 0.0, 0.0))
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn phase(&self) -> ClockPhase {
        self.clock.phase()
    }

    pub fn regime(&self) -> RegimeState {
        self.regime
    }

    pub fn chart(&self) -> Vec<Tick> {
        self.window.to_vec()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.ledger.orders().to_vec()
    }

    pub fn ledger(&self) -> &PortfolioLedger {
        &self.ledger
    }

    pub fn status(&self) -> GameStatus {
        let tick = self.current_tick();
        let profit_loss = self.ledger.profit_loss(tick.bid);
        GameStatus {
            game_id: self.game_id,
            phase: self.clock.phase(),
            remaining_secs: self.clock.remaining_secs(),
            duration_secs: self.clock.duration_secs(),
            current_bid: tick.bid,
            current_ask: tick.ask,
            situation: self.regime.situation(),
            starting_balance: self.ledger.starting_balance(),
            cash_balance: self.ledger.cash_balance(),
            share_holdings: self.ledger.share_holdings(),
            total_commissions: self.ledger.total_commissions(),
            profit_loss,
            is_profit: profit_loss >= 0.0,
            last_summary: self.last_summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(duration: u64) -> SimConfig {
        SimConfig {
            game_duration_secs: duration,
            seed: Some(11),
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_trading_requires_running_game() {
        let mut session = GameSession::new(&config(5));
        assert_eq!(session.buy(1), Err(TradeRejection::GameNotRunning));
        assert_eq!(session.sell(1), Err(TradeRejection::GameNotRunning));
        assert_eq!(session.advance(), Advance::Idle);
    }

    #[test]
    fn test_start_resets_ledger_and_chart() {
        let mut session = GameSession::new(&config(5));
        session.start().unwrap();
        session.advance();
        session.buy(10).unwrap();
        session.stop().unwrap();

        session.start().unwrap();
        let status = session.status();
        assert_eq!(status.cash_balance, 50_000.0);
        assert_eq!(status.share_holdings, 0);
        assert_eq!(status.total_commissions, 0.0);
        assert_eq!(status.remaining_secs, 5);
        assert_eq!(session.chart().len(), 7);
        assert_eq!(session.regime(), RegimeState::default());
    }

    #[test]
    fn test_buy_and_sell_both_fill_at_bid() {
        let mut session = GameSession::new(&config(5));
        session.start().unwrap();
        let tick = session.current_tick();

        let buy = session.buy(10).unwrap();
        assert_eq!(buy.price_per_share, tick.bid);
        let sell = session.sell(4).unwrap();
        assert_eq!(sell.price_per_share, tick.bid);
        assert_eq!(session.ledger().share_holdings(), 6);
    }

    #[test]
    fn test_round_trip_on_same_quote_only_loses_commissions() {
        let mut session = GameSession::new(&config(5));
        session.start().unwrap();

        session.buy(500).unwrap();
        session.sell(500).unwrap();

        let status = session.status();
        assert!(status.cash_balance <= 50_000.0, "cash grew to {}", status.cash_balance);
        assert!(status.profit_loss < 0.0);
        assert_eq!(
            crate::engine::round_cents(50_000.0 - status.cash_balance),
            status.total_commissions
        );
    }

    #[test]
    fn test_game_ends_after_duration_with_summary() {
        let mut session = GameSession::new(&config(3));
        let game_id = session.start().unwrap();

        assert!(matches!(session.advance(), Advance::Ticked { remaining_secs: 2, .. }));
        assert!(matches!(session.advance(), Advance::Ticked { remaining_secs: 1, .. }));
        let summary = match session.advance() {
            Advance::Ended { summary, .. } => summary,
            other => panic!("expected end of game, got {other:?}"),
        };

        assert_eq!(summary.game_id, game_id);
        assert!(!summary.ended_early);
        assert_eq!(session.phase(), ClockPhase::Ended);
        assert_eq!(session.advance(), Advance::Idle);
        assert_eq!(session.status().last_summary, Some(summary));
        assert_eq!(session.chart().len(), 10);
    }

    #[test]
    fn test_every_tick_keeps_ask_above_bid() {
        let mut session = GameSession::new(&config(500));
        session.start().unwrap();
        for _ in 0..499 {
            match session.advance() {
                Advance::Ticked { tick, .. } => assert!(tick.ask >= tick.bid),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(matches!(session.advance(), Advance::Ended { .. }));
        assert_eq!(session.chart().len(), 60);
    }

    #[test]
    fn test_stop_reports_live_profit_loss() {
        let mut session = GameSession::new(&config(60));
        session.start().unwrap();
        session.buy(10).unwrap();
        let live = session.status().profit_loss;
        let summary = session.stop().unwrap();
        assert!(summary.ended_early);
        assert_eq!(summary.profit_loss, live);
        assert_eq!(summary.share_holdings, 10);
        assert_eq!(session.stop(), Err(ClockError::NotRunning));
    }
}
