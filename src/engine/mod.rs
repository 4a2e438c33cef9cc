//! Simulation engine: price walk, commissions, ledger, clock, and the session
//! that composes them.

pub mod clock;
pub mod commission;
pub mod driver;
pub mod ledger;
pub mod price;
pub mod session;

/// Round a money amount to cents.
#[inline]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(48_990.010000000002), 48_990.01);
        assert_eq!(round_cents(-9.989999999998), -9.99);
        assert_eq!(round_cents(0.005), 0.01);
    }
}
