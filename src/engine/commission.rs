//! # engine::commission
//!
//! Broker fee schedule: a flat base plus a percentage of the order value,
//! clamped to a minimum and a maximum. Sells are additionally capped at half
//! the order value so tiny sales are never eaten entirely by fees.

use serde::Serialize;

use crate::engine::round_cents;
use crate::models::Side;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionSchedule {
    pub base_fee: f64,
    /// Fraction of the order value added on top of `base_fee`.
    pub rate: f64,
    pub min_fee: f64,
    pub max_fee: f64,
    /// Sell fees never exceed `sell_cap_ratio × order value`.
    pub sell_cap_ratio: f64,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self {
            base_fee: 4.95,
            rate: 0.0025,
            min_fee: 9.99,
            max_fee: 59.99,
            sell_cap_ratio: 0.5,
        }
    }
}

impl CommissionSchedule {
    /// Fee for an order worth `order_value`, rounded to cents.
    pub fn commission(&self, order_value: f64, side: Side) -> f64 {
        let mut fee = (self.base_fee + self.rate * order_value).clamp(self.min_fee, self.max_fee);
        if side == Side::Sell {
            fee = fee.min(self.sell_cap_ratio * order_value);
        }
        round_cents(fee)
    }
}

/// [`CommissionSchedule::commission`] under the default schedule.
pub fn commission(order_value: f64, side: Side) -> f64 {
    CommissionSchedule::default().commission(order_value, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_order_pays_minimum() {
        // 4.95 + 2.50 = 7.45 → raised to the 9.99 floor
        assert_eq!(commission(1000.0, Side::Buy), 9.99);
    }

    #[test]
    fn test_mid_order_pays_percentage() {
        // 4.95 + 0.0025 × 8000 = 24.95
        assert_eq!(commission(8000.0, Side::Buy), 24.95);
        assert_eq!(commission(8000.0, Side::Sell), 24.95);
    }

    #[test]
    fn test_large_order_capped_at_maximum() {
        assert_eq!(commission(1_000_000.0, Side::Buy), 59.99);
    }

    #[test]
    fn test_buy_commission_always_within_bounds() {
        let mut value = 0.0;
        while value < 100_000.0 {
            let fee = commission(value, Side::Buy);
            assert!((9.99..=59.99).contains(&fee), "value {value} → fee {fee}");
            value += 137.31;
        }
    }

    #[test]
    fn test_tiny_sell_capped_at_half_value() {
        assert_eq!(commission(10.0, Side::Sell), 5.0);
        assert_eq!(commission(10.0, Side::Buy), 9.99);
        assert_eq!(commission(0.0, Side::Sell), 0.0);
    }
}
