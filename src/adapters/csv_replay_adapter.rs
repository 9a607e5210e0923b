//! CSV replay market data adapter.
//!
//! Serves a recorded bar file through the market data port for dry runs
//! and tests. Each gateway call advances replay time by one bar: the
//! history grows by one entry per fetch and quotes are synthesized from
//! the then-current close with a configured half-spread.

use crate::domain::error::OscalpError;
use crate::domain::market::{OhlcHistory, Quote};
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDateTime;
use std::cell::Cell;
use std::path::Path;

#[derive(Debug, Clone)]
struct ReplayBar {
    timestamp: NaiveDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

pub struct CsvReplayAdapter {
    bars: Vec<ReplayBar>,
    cursor: Cell<usize>,
    half_spread_pct: f64,
}

impl CsvReplayAdapter {
    /// Load a bar file with columns `timestamp,open,high,low,close`.
    /// Replay starts with `warmup_bars` bars already visible.
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        warmup_bars: usize,
        half_spread_pct: f64,
    ) -> Result<Self, OscalpError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| OscalpError::MarketData {
            symbol: path.display().to_string(),
            reason: format!("failed to open bar file: {}", e),
        })?;

        let mut bars = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| OscalpError::MarketData {
                symbol: path.display().to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;
            bars.push(Self::parse_bar(&record, path)?);
        }

        if bars.is_empty() {
            return Err(OscalpError::MarketData {
                symbol: path.display().to_string(),
                reason: "bar file contains no rows".into(),
            });
        }
        if bars.windows(2).any(|w| w[0].timestamp >= w[1].timestamp) {
            return Err(OscalpError::MarketData {
                symbol: path.display().to_string(),
                reason: "bars are not in strict chronological order".into(),
            });
        }

        Ok(Self {
            bars,
            cursor: Cell::new(warmup_bars),
            half_spread_pct,
        })
    }

    fn parse_bar(record: &csv::StringRecord, path: &Path) -> Result<ReplayBar, OscalpError> {
        let field = |idx: usize, name: &str| -> Result<&str, OscalpError> {
            record.get(idx).ok_or_else(|| OscalpError::MarketData {
                symbol: path.display().to_string(),
                reason: format!("missing {} column", name),
            })
        };
        let price = |idx: usize, name: &str| -> Result<f64, OscalpError> {
            field(idx, name)?
                .parse()
                .map_err(|e| OscalpError::MarketData {
                    symbol: path.display().to_string(),
                    reason: format!("invalid {} value: {}", name, e),
                })
        };

        let timestamp = NaiveDateTime::parse_from_str(field(0, "timestamp")?, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| OscalpError::MarketData {
                symbol: path.display().to_string(),
                reason: format!("invalid timestamp: {}", e),
            })?;

        Ok(ReplayBar {
            timestamp,
            open: price(1, "open")?,
            high: price(2, "high")?,
            low: price(3, "low")?,
            close: price(4, "close")?,
        })
    }

    /// Bars remaining past the current replay position.
    pub fn remaining(&self) -> usize {
        self.bars.len().saturating_sub(self.cursor.get())
    }

    /// Close of the latest visible bar; paper fills execute here. `None`
    /// until at least one bar is visible (a zero-warmup replay before
    /// its first fetch).
    pub fn last_served_price(&self) -> Option<f64> {
        let idx = self.cursor.get().min(self.bars.len());
        idx.checked_sub(1).map(|i| self.bars[i].close)
    }

    fn advance(&self) -> Result<usize, OscalpError> {
        let idx = self.cursor.get();
        if idx >= self.bars.len() {
            return Err(OscalpError::MarketData {
                symbol: "replay".into(),
                reason: "bar file exhausted".into(),
            });
        }
        self.cursor.set(idx + 1);
        Ok(idx)
    }
}

impl MarketDataPort for CsvReplayAdapter {
    fn fetch_ohlc(
        &self,
        _symbol: &str,
        _interval: &str,
        _span: &str,
        _bounds: &str,
    ) -> Result<OhlcHistory, OscalpError> {
        let idx = self.advance()?;
        let visible = &self.bars[..=idx];
        Ok(OhlcHistory {
            open: visible.iter().map(|b| b.open).collect(),
            high: visible.iter().map(|b| b.high).collect(),
            low: visible.iter().map(|b| b.low).collect(),
            close: visible.iter().map(|b| b.close).collect(),
        })
    }

    fn fetch_quote(&self, _symbol: &str) -> Result<Quote, OscalpError> {
        let idx = self.advance()?;
        let close = self.bars[idx].close;
        let half_spread = close * self.half_spread_pct / 100.0;
        Ok(Quote {
            mark: close,
            ask: close + half_spread,
            bid: close - half_spread,
        })
    }
}
