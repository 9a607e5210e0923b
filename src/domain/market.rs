//! Market data representations: OHLC histories and live quotes.

use serde::Serialize;
use std::fmt;

/// Time-ordered OHLC price history for a single symbol, one entry per bar.
/// All four series are chronological and equal length; the last entry is
/// the most recent bar.
#[derive(Debug, Clone, Default)]
pub struct OhlcHistory {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OhlcHistory {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// True when all four series have the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.close.len();
        self.open.len() == n && self.high.len() == n && self.low.len() == n
    }

    /// Raw low of the most recent bar, if any.
    pub fn latest_low(&self) -> Option<f64> {
        self.low.last().copied()
    }
}

/// Live quote: mark, ask and bid prices. ask >= bid is trusted input,
/// not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub mark: f64,
    pub ask: f64,
    pub bid: f64,
}

impl Quote {
    /// (bid + ask) / 2
    pub fn midpoint(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

/// Acknowledgement from the order gateway. The identifier is optional
/// because some gateways only confirm acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAck {
    pub order_id: Option<String>,
}
