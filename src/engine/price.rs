//! # engine::price
//!
//! **Price Engine** — produces the next bid/ask tick from the previous one.
//!
//! ```text
//!  regime          side walked          regime after
//!  ─────────────── ──────────────────── ─────────────────────────────
//!  bearish(n > 0)  bid                  bearish(n - 1)
//!  bullish(n > 0)  ask                  bullish(n - 1)
//!  neutral         coin flip:
//!                    bid + offset  ──▶  bearish(RUN_LENGTH - 1)
//!                    ask - offset  ──▶  bullish(RUN_LENGTH - 1)
//! ```
//!
//! One walk step moves the price by a uniform magnitude in
//! `[min_step, max_step)` with a 50/50 sign. Prices never drop below
//! `price_floor`, the ask never drops below `bid + min_spread`, and both are
//! rounded to cents.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::env_f64;
use crate::engine::round_cents;
use crate::models::{RegimeState, Tick, RUN_LENGTH};

// ─── Config ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct WalkConfig {
    /// Smallest absolute move of one step.
    pub min_step: f64,
    /// Upper (exclusive) bound of one step.
    pub max_step: f64,
    /// Upper bound of the extra offset applied when a new run opens.
    pub max_offset: f64,
    /// No price ever goes below this.
    pub price_floor: f64,
    /// Smallest allowed `ask - bid`.
    pub min_spread: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            min_step: 0.01,
            max_step: 0.11,
            max_offset: 0.05,
            price_floor: 0.10,
            min_spread: 0.01,
        }
    }
}

impl WalkConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            min_step:    env_f64("SIM_MIN_STEP", d.min_step),
            max_step:    env_f64("SIM_MAX_STEP", d.max_step),
            max_offset:  env_f64("SIM_MAX_OFFSET", d.max_offset),
            price_floor: env_f64("SIM_PRICE_FLOOR", d.price_floor),
            min_spread:  env_f64("SIM_MIN_SPREAD", d.min_spread),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let all = [self.min_step, self.max_step, self.max_offset, self.price_floor, self.min_spread];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            anyhow::bail!("random-walk settings must be finite and non-negative: {self:?}");
        }
        if self.min_step > self.max_step {
            anyhow::bail!(
                "SIM_MIN_STEP ({}) must not exceed SIM_MAX_STEP ({})",
                self.min_step,
                self.max_step
            );
        }
        if self.price_floor <= 0.0 {
            anyhow::bail!("SIM_PRICE_FLOOR must be positive");
        }
        Ok(())
    }
}

// ─── Pure step function ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Bid,
    Ask,
}

/// Compute the tick that follows `prev` under `regime`.
///
/// Pure apart from the random source; the returned tick carries
/// `prev.sequence_index + 1` and the current time.
pub fn next_tick<R: Rng + ?Sized>(
    prev: &Tick,
    regime: RegimeState,
    config: &WalkConfig,
    rng: &mut R,
) -> (Tick, RegimeState) {
    let mut bid = prev.bid;
    let mut ask = prev.ask;

    let (walked, next_regime) = if regime.bearish_runs_remaining > 0 {
        bid = walk(bid, config, rng);
        (Quote::Bid, RegimeState::bearish(regime.bearish_runs_remaining - 1))
    } else if regime.bullish_runs_remaining > 0 {
        ask = walk(ask, config, rng);
        (Quote::Ask, RegimeState::bullish(regime.bullish_runs_remaining - 1))
    } else {
        let offset = rng.gen::<f64>() * config.max_offset * random_sign(rng);
        if rng.gen_bool(0.5) {
            bid = walk(bid + offset, config, rng);
            (Quote::Bid, RegimeState::bearish(RUN_LENGTH - 1))
        } else {
            ask = walk(ask - offset, config, rng);
            (Quote::Ask, RegimeState::bullish(RUN_LENGTH - 1))
        }
    };

    let (bid, ask) = keep_spread(bid, ask, walked, config);
    let tick = Tick::new(prev.sequence_index + 1, bid, ask);

    trace!(
        seq = tick.sequence_index,
        bid = tick.bid,
        ask = tick.ask,
        ?walked,
        situation = ?next_regime.situation(),
        "price tick"
    );

    (tick, next_regime)
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) { -1.0 } else { 1.0 }
}

/// One random-walk step from `base`, floored and rounded.
fn walk<R: Rng + ?Sized>(base: f64, config: &WalkConfig, rng: &mut R) -> f64 {
    let magnitude = config.min_step + rng.gen::<f64>() * (config.max_step - config.min_step);
    let moved = base + magnitude * random_sign(rng);
    round_cents(moved.max(config.price_floor))
}

/// Restore `ask >= bid + min_spread` by moving the side that did not walk.
fn keep_spread(mut bid: f64, mut ask: f64, walked: Quote, config: &WalkConfig) -> (f64, f64) {
    if ask >= bid + config.min_spread {
        return (bid, ask);
    }
    match walked {
        Quote::Bid => {
            ask = round_cents(bid + config.min_spread);
        }
        Quote::Ask => {
            bid = round_cents((ask - config.min_spread).max(config.price_floor));
            if ask < bid + config.min_spread {
                ask = round_cents(bid + config.min_spread);
            }
        }
    }
    (bid, ask.max(bid))
}

// ─── PriceEngine ──────────────────────────────────────────────────────────────

/// [`next_tick`] bundled with its configuration and random source.
pub struct PriceEngine {
    config: WalkConfig,
    rng: StdRng,
}

impl PriceEngine {
    pub fn new(config: WalkConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn tick(&mut self, prev: &Tick, regime: RegimeState) -> (Tick, RegimeState) {
        next_tick(prev, regime, &self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketSituation;

    fn start_tick() -> Tick {
        Tick::new(6, 99.00, 100.00)
    }

    #[test]
    fn test_ask_never_below_bid_over_long_walk() {
        let mut engine = PriceEngine::new(WalkConfig::default(), Some(7));
        let mut tick = start_tick();
        let mut regime = RegimeState::default();
        for _ in 0..10_000 {
            let (next, next_regime) = engine.tick(&tick, regime);
            assert!(next.ask >= next.bid, "ask {} < bid {}", next.ask, next.bid);
            assert!(next.bid >= 0.10);
            tick = next;
            regime = next_regime;
        }
    }

    #[test]
    fn test_bearish_run_walks_only_bid() {
        let mut rng = StdRng::seed_from_u64(1);
        let prev = start_tick();
        let (next, regime) = next_tick(&prev, RegimeState::bearish(2), &WalkConfig::default(), &mut rng);
        assert_eq!(next.ask, prev.ask);
        let moved = (next.bid - prev.bid).abs();
        assert!((0.01..=0.11).contains(&moved), "moved {moved}");
        assert_eq!(regime, RegimeState::bearish(1));
    }

    #[test]
    fn test_bullish_run_walks_only_ask() {
        let mut rng = StdRng::seed_from_u64(2);
        let prev = start_tick();
        let (next, regime) = next_tick(&prev, RegimeState::bullish(1), &WalkConfig::default(), &mut rng);
        assert_eq!(next.bid, prev.bid);
        assert_ne!(next.ask, prev.ask);
        assert!(regime.is_neutral());
    }

    #[test]
    fn test_neutral_regime_opens_new_run() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (_, regime) = next_tick(&start_tick(), RegimeState::default(), &WalkConfig::default(), &mut rng);
            assert_ne!(regime.situation(), MarketSituation::Neutral);
            assert_eq!(regime.bearish_runs_remaining + regime.bullish_runs_remaining, RUN_LENGTH - 1);
        }
    }

    #[test]
    fn test_sequence_index_advances() {
        let mut engine = PriceEngine::new(WalkConfig::default(), Some(4));
        let (next, _) = engine.tick(&start_tick(), RegimeState::default());
        assert_eq!(next.sequence_index, 7);
    }

    #[test]
    fn test_price_floor_holds_near_zero() {
        let config = WalkConfig { min_step: 0.5, max_step: 0.5, ..WalkConfig::default() };
        let mut rng = StdRng::seed_from_u64(5);
        let mut tick = Tick::new(0, 0.10, 0.11);
        let mut regime = RegimeState::default();
        for _ in 0..500 {
            let (next, r) = next_tick(&tick, regime, &config, &mut rng);
            assert!(next.bid >= 0.10);
            assert!(next.ask >= next.bid);
            tick = next;
            regime = r;
        }
    }

    #[test]
    fn test_spread_restored_when_bid_crosses_ask() {
        let config = WalkConfig::default();
        let (bid, ask) = keep_spread(101.00, 100.00, Quote::Bid, &config);
        assert_eq!((bid, ask), (101.00, 101.01));

        let (bid, ask) = keep_spread(100.00, 99.50, Quote::Ask, &config);
        assert_eq!((bid, ask), (99.49, 99.50));
    }

    #[test]
    fn test_seeded_engines_replay_identically() {
        let mut a = PriceEngine::new(WalkConfig::default(), Some(42));
        let mut b = PriceEngine::new(WalkConfig::default(), Some(42));
        let (ta, ra) = a.tick(&start_tick(), RegimeState::default());
        let (tb, rb) = b.tick(&start_tick(), RegimeState::default());
        assert_eq!((ta.bid, ta.ask, ra), (tb.bid, tb.ask, rb));
    }

    #[test]
    fn test_zero_offset_and_fixed_step_do_not_panic() {
        let config = WalkConfig { min_step: 0.05, max_step: 0.05, max_offset: 0.0, ..WalkConfig::default() };
        let mut rng = StdRng::seed_from_u64(6);
        let (next, regime) = next_tick(&start_tick(), RegimeState::default(), &config, &mut rng);
        let (moved, untouched) = match regime.situation() {
            MarketSituation::Bearish => ((next.bid - 99.00).abs(), next.ask - 100.00),
            _ => ((next.ask - 100.00).abs(), next.bid - 99.00),
        };
        assert!((moved - 0.05).abs() < 1e-9, "moved {moved}");
        assert_eq!(untouched, 0.0);
    }
}
