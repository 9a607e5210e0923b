//! Order gateway port trait.
//!
//! The engine only ever buys by notional and sells by quantity, both at
//! market. Any `Err` from the submission methods is a fatal-tier error;
//! the engine never retries with altered parameters.

use crate::domain::error::OscalpError;
use crate::domain::market::OrderAck;

pub trait OrderPort {
    /// Submit a market buy for a dollar notional amount.
    fn buy_by_notional(&self, symbol: &str, notional: f64) -> Result<OrderAck, OscalpError>;

    /// Submit a market sell for a unit quantity.
    fn sell_by_quantity(&self, symbol: &str, quantity: f64) -> Result<OrderAck, OscalpError>;

    /// Quantity of the symbol currently held.
    fn held_quantity(&self, symbol: &str) -> Result<f64, OscalpError>;

    /// Cash currently available to trade, before the driver's reserve.
    fn available_cash(&self) -> Result<f64, OscalpError>;
}
