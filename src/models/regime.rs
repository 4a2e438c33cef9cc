//! # models::regime
//!
//! [`RegimeState`] — the short bearish/bullish streak that biases which side
//! of the quote the random walk moves.

use serde::{Deserialize, Serialize};

/// Number of ticks a freshly started run lasts, the opening tick included.
pub const RUN_LENGTH: u8 = 2;

/// Run counters. At most one of them is non-zero at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeState {
    /// Ticks left in which the bid keeps walking.
    pub bearish_runs_remaining: u8,
    /// Ticks left in which the ask keeps walking.
    pub bullish_runs_remaining: u8,
}

impl RegimeState {
    pub fn bearish(runs: u8) -> Self {
        Self {
            bearish_runs_remaining: runs,
            bullish_runs_remaining: 0,
        }
    }

    pub fn bullish(runs: u8) -> Self {
        Self {
            bearish_runs_remaining: 0,
            bullish_runs_remaining: runs,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.bearish_runs_remaining == 0 && self.bullish_runs_remaining == 0
    }

    pub fn situation(&self) -> MarketSituation {
        if self.bearish_runs_remaining > 0 {
            MarketSituation::Bearish
        } else if self.bullish_runs_remaining > 0 {
            MarketSituation::Bullish
        } else {
            MarketSituation::Neutral
        }
    }
}

// ─── MarketSituation ──────────────────────────────────────────────────────────

/// Label the dashboard shows next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketSituation {
    Bearish,
    Bullish,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_situation_follows_active_run() {
        assert_eq!(RegimeState::default().situation(), MarketSituation::Neutral);
        assert_eq!(RegimeState::bearish(2).situation(), MarketSituation::Bearish);
        assert_eq!(RegimeState::bullish(1).situation(), MarketSituation::Bullish);
    }

    #[test]
    fn test_constructors_are_mutually_exclusive() {
        let r = RegimeState::bearish(RUN_LENGTH);
        assert_eq!(r.bullish_runs_remaining, 0);
        assert!(!r.is_neutral());
    }
}
