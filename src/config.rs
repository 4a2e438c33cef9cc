//! # config — read simulator settings from environment variables
//!
//! | Variable                 | Default         | Description                          |
//! |--------------------------|-----------------|--------------------------------------|
//! | `BIND_ADDR`              | `0.0.0.0:3000`  | Address Axum listens on              |
//! | `SIM_STARTING_BALANCE`   | `50000`         | Cash every game starts with          |
//! | `SIM_GAME_DURATION_SECS` | `600`           | Game length in clock seconds         |
//! | `SIM_TICK_INTERVAL_MS`   | `1000`          | Wall-clock length of one clock second|
//! | `SIM_CHART_WINDOW`       | `60`            | Ticks kept for the chart (1..=10000) |
//! | `SIM_SEED`               | unset           | Fixed RNG seed for reproducible games|
//!
//! Random-walk knobs are read by [`WalkConfig::from_env`].

use std::time::Duration;

use anyhow::{bail, Context};

use crate::engine::price::WalkConfig;

/// Upper bound for `SIM_CHART_WINDOW`.
pub const MAX_CHART_WINDOW: usize = 10_000;

/// Everything a [`GameSession`](crate::engine::session::GameSession) and the
/// server need.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub bind_addr: String,
    pub starting_balance: f64,
    pub game_duration_secs: u64,
    pub tick_interval: Duration,
    pub chart_window: usize,
    /// `None` = seed from the OS.
    pub seed: Option<u64>,
    pub walk: WalkConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            starting_balance: 50_000.0,
            game_duration_secs: 10 * 60,
            tick_interval: Duration::from_millis(1000),
            chart_window: 60,
            seed: None,
            walk: WalkConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let seed = match std::env::var("SIM_SEED") {
            Ok(v) => Some(v.parse().context("SIM_SEED must be an unsigned integer")?),
            Err(_) => None,
        };

        let config = Self {
            bind_addr:          std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            starting_balance:   env_f64("SIM_STARTING_BALANCE", 50_000.0),
            game_duration_secs: env_u64("SIM_GAME_DURATION_SECS", 600),
            tick_interval:      Duration::from_millis(env_u64("SIM_TICK_INTERVAL_MS", 1000)),
            chart_window:       usize::try_from(env_u64("SIM_CHART_WINDOW", 60)).unwrap_or(usize::MAX),
            seed,
            walk:               WalkConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the game meaningless.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.starting_balance.is_finite() && self.starting_balance > 0.0) {
            bail!("SIM_STARTING_BALANCE must be a positive number, got {}", self.starting_balance);
        }
        if self.game_duration_secs == 0 {
            bail!("SIM_GAME_DURATION_SECS must be at least 1");
        }
        if self.tick_interval.is_zero() {
            bail!("SIM_TICK_INTERVAL_MS must be at least 1");
        }
        if self.chart_window == 0 || self.chart_window > MAX_CHART_WINDOW {
            bail!(
                "SIM_CHART_WINDOW must be between 1 and {MAX_CHART_WINDOW}, got {}",
                self.chart_window
            );
        }
        self.walk.validate()
    }
}

pub(crate) fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub(crate) fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_balance, 50_000.0);
        assert_eq!(config.game_duration_secs, 600);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = SimConfig { game_duration_secs: 0, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_balance_rejected() {
        let config = SimConfig { starting_balance: -1.0, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_chart_window_bounds() {
        let too_wide = SimConfig { chart_window: MAX_CHART_WINDOW + 1, ..SimConfig::default() };
        assert!(too_wide.validate().is_err());
        let empty = SimConfig { chart_window: 0, ..SimConfig::default() };
        assert!(empty.validate().is_err());
        let widest = SimConfig { chart_window: MAX_CHART_WINDOW, ..SimConfig::default() };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_inverted_step_range_rejected() {
        let mut config = SimConfig::default();
        config.walk.min_step = 0.5;
        config.walk.max_step = 0.1;
        assert!(config.validate().is_err());
    }
}
