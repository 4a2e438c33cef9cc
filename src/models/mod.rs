//! Domain models shared across the simulator.

pub mod order;
pub mod regime;
pub mod tick;

pub use order::{LedgerState, Order, Side};
pub use regime::{MarketSituation, RegimeState, RUN_LENGTH};
pub use tick::{PriceWindow, Tick};
