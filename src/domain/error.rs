//! Domain error types.
//!
//! Two behavioral tiers: market-data errors are recoverable (the engine
//! reports them and skips the cycle), order errors are fatal (the driver
//! terminates the process). Config errors only occur at startup.

/// Top-level error type for oscalp.
#[derive(Debug, thiserror::Error)]
pub enum OscalpError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("market data error for {symbol}: {reason}")]
    MarketData { symbol: String, reason: String },

    #[error("quote unavailable for {symbol}: {reason}")]
    Quote { symbol: String, reason: String },

    #[error("insufficient history for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("{side} order rejected for {symbol}: {reason}")]
    OrderRejected {
        side: crate::domain::market::OrderSide,
        symbol: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OscalpError {
    /// Recoverable errors are reported and the cycle skipped; everything
    /// else must stop the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OscalpError::MarketData { .. }
                | OscalpError::Quote { .. }
                | OscalpError::InsufficientHistory { .. }
        )
    }
}

impl From<&OscalpError> for std::process::ExitCode {
    fn from(err: &OscalpError) -> Self {
        let code: u8 = match err {
            OscalpError::Io(_) => 1,
            OscalpError::ConfigParse { .. }
            | OscalpError::ConfigMissing { .. }
            | OscalpError::ConfigInvalid { .. } => 2,
            OscalpError::MarketData { .. }
            | OscalpError::Quote { .. }
            | OscalpError::InsufficientHistory { .. } => 3,
            OscalpError::OrderRejected { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::OrderSide;

    #[test]
    fn order_rejection_is_fatal() {
        let err = OscalpError::OrderRejected {
            side: OrderSide::Buy,
            symbol: "BTC".into(),
            reason: "insufficient funds".into(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn data_errors_are_recoverable() {
        let fetch = OscalpError::MarketData {
            symbol: "BTC".into(),
            reason: "timeout".into(),
        };
        let quote = OscalpError::Quote {
            symbol: "BTC".into(),
            reason: "timeout".into(),
        };
        let history = OscalpError::InsufficientHistory {
            symbol: "BTC".into(),
            bars: 5,
            minimum: 16,
        };
        assert!(fetch.is_recoverable());
        assert!(quote.is_recoverable());
        assert!(history.is_recoverable());
    }

    #[test]
    fn error_display_includes_context() {
        let err = OscalpError::InsufficientHistory {
            symbol: "ETH".into(),
            bars: 3,
            minimum: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("ETH"));
        assert!(msg.contains('3'));
        assert!(msg.contains("16"));
    }

    #[test]
    fn sell_rejection_mentions_side() {
        let err = OscalpError::OrderRejected {
            side: OrderSide::Sell,
            symbol: "BTC".into(),
            reason: "insufficient holdings".into(),
        };
        assert!(err.to_string().starts_with("sell order rejected"));
    }
}
