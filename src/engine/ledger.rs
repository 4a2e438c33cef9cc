//! # engine::ledger
//!
//! **Portfolio Ledger** — the player's cash, share holdings and order
//! history. Every buy/sell goes through here.
//!
//! A rejected order is returned as [`TradeRejection`] and leaves the ledger
//! exactly as it was.

use tracing::{debug, info};

use crate::engine::commission::CommissionSchedule;
use crate::engine::round_cents;
use crate::error::TradeRejection;
use crate::models::{LedgerState, Order, Side};

pub struct PortfolioLedger {
    starting_balance: f64,
    cash_balance: f64,
    share_holdings: u64,
    orders: Vec<Order>,
    schedule: CommissionSchedule,
}

impl PortfolioLedger {
    pub fn new(starting_balance: f64) -> Self {
        Self::with_schedule(starting_balance, CommissionSchedule::default())
    }

    pub fn with_schedule(starting_balance: f64, schedule: CommissionSchedule) -> Self {
        Self {
            starting_balance,
            cash_balance: starting_balance,
            share_holdings: 0,
            orders: Vec::new(),
            schedule,
        }
    }

    /// Back to the starting balance with no shares and no orders.
    pub fn reset(&mut self) {
        self.cash_balance = self.starting_balance;
        self.share_holdings = 0;
        self.orders.clear();
    }

    // ─── Orders ───────────────────────────────────────────────────────────────

    /// Buy `shares` at `price` each.
    ///
    /// Rejected when `shares` is 0 or the cash balance cannot cover
    /// `shares × price + commission`.
    pub fn buy(&mut self, shares: u64, price: f64, tick_index: u64) -> Result<Order, TradeRejection> {
        check_price(price)?;
        if shares == 0 {
            return Err(TradeRejection::NonPositiveShares);
        }

        let value = shares as f64 * price;
        let commission = self.schedule.commission(value, Side::Buy);
        let required = value + commission;
        if self.cash_balance < required {
            debug!(shares, price, required, cash = self.cash_balance, "buy rejected — insufficient funds");
            return Err(TradeRejection::InsufficientFunds {
                required: round_cents(required),
                available: self.cash_balance,
            });
        }

        self.cash_balance = round_cents(self.cash_balance - required);
        self.share_holdings += shares;

        let order = Order::new(Side::Buy, shares, price, commission, tick_index);
        info!(
            order_id = %order.order_id,
            shares,
            price,
            commission,
            cash = self.cash_balance,
            holdings = self.share_holdings,
            "📈 BUY filled"
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Sell up to `shares` at `price` each.
    ///
    /// Requests above the current holdings are clamped to the holdings;
    /// rejected when nothing is left to sell.
    pub fn sell(&mut self, shares: u64, price: f64, tick_index: u64) -> Result<Order, TradeRejection> {
        check_price(price)?;
        if shares == 0 {
            return Err(TradeRejection::NonPositiveShares);
        }

        let filled = shares.min(self.share_holdings);
        if filled == 0 {
            return Err(TradeRejection::NoHoldings);
        }
        if filled < shares {
            debug!(requested = shares, filled, "sell clamped to holdings");
        }

        let value = filled as f64 * price;
        let commission = self.schedule.commission(value, Side::Sell);

        self.cash_balance = round_cents(self.cash_balance + value - commission);
        self.share_holdings -= filled;

        let order = Order::new(Side::Sell, filled, price, commission, tick_index);
        info!(
            order_id = %order.order_id,
            shares = filled,
            price,
            commission,
            cash = self.cash_balance,
            holdings = self.share_holdings,
            "📉 SELL filled"
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    // ─── Accounting ───────────────────────────────────────────────────────────

    pub fn total_commissions(&self) -> f64 {
        round_cents(self.orders.iter().map(|o| o.commission).sum())
    }

    /// Profit or loss if the game were valued at `current_bid` right now.
    ///
    /// Holdings at `current_bid`, minus commissions paid, minus the cash that
    /// went into shares (net of sale proceeds, commissions excluded).
    pub fn profit_loss(&self, current_bid: f64) -> f64 {
        let holdings_value = self.share_holdings as f64 * current_bid;
        let commissions = self.total_commissions();
        let net_cash_deviation = (self.starting_balance - self.cash_balance) - commissions;
        round_cents(holdings_value - commissions - net_cash_deviation)
    }

    pub fn starting_balance(&self) -> f64 {
        self.starting_balance
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    pub fn share_holdings(&self) -> u64 {
        self.share_holdings
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn state(&self) -> LedgerState {
        LedgerState {
            cash_balance: self.cash_balance,
            share_holdings: self.share_holdings,
            order_history: self.orders.clone(),
        }
    }
}

fn check_price(price: f64) -> Result<(), TradeRejection> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(TradeRejection::InvalidPrice(price))
    }
}
