//! Market data access port trait.

use crate::domain::error::OscalpError;
use crate::domain::market::{OhlcHistory, Quote};

pub trait MarketDataPort {
    /// Fetch the historical OHLC series for a symbol. Series are
    /// chronological and equal length; errors are recoverable and make
    /// the engine skip the cycle.
    fn fetch_ohlc(
        &self,
        symbol: &str,
        interval: &str,
        span: &str,
        bounds: &str,
    ) -> Result<OhlcHistory, OscalpError>;

    /// Fetch the live mark/ask/bid quote for a symbol.
    fn fetch_quote(&self, symbol: &str) -> Result<Quote, OscalpError>;
}
