#![allow(dead_code)]

use oscalp::domain::error::OscalpError;
use oscalp::domain::event::EngineEvent;
use oscalp::domain::market::{OhlcHistory, OrderAck, Quote};
use oscalp::ports::clock_port::ClockPort;
use oscalp::ports::market_data_port::MarketDataPort;
use oscalp::ports::order_port::OrderPort;
use oscalp::ports::report_port::ReportPort;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

/// Scripted market data source. Each fetch pops the next scripted
/// response; running past the script is a test authoring bug and panics.
pub struct MockMarketDataPort {
    histories: RefCell<VecDeque<Result<OhlcHistory, OscalpError>>>,
    quotes: RefCell<VecDeque<Result<Quote, OscalpError>>>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            histories: RefCell::new(VecDeque::new()),
            quotes: RefCell::new(VecDeque::new()),
        }
    }

    pub fn with_history(self, history: OhlcHistory) -> Self {
        self.histories.borrow_mut().push_back(Ok(history));
        self
    }

    pub fn with_history_error(self, reason: &str) -> Self {
        self.histories
            .borrow_mut()
            .push_back(Err(OscalpError::MarketData {
                symbol: "TEST".to_string(),
                reason: reason.to_string(),
            }));
        self
    }

    pub fn with_quote(self, mark: f64, ask: f64, bid: f64) -> Self {
        self.quotes
            .borrow_mut()
            .push_back(Ok(Quote { mark, ask, bid }));
        self
    }

    pub fn with_quote_error(self, reason: &str) -> Self {
        self.quotes.borrow_mut().push_back(Err(OscalpError::Quote {
            symbol: "TEST".to_string(),
            reason: reason.to_string(),
        }));
        self
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_ohlc(
        &self,
        _symbol: &str,
        _interval: &str,
        _span: &str,
        _bounds: &str,
    ) -> Result<OhlcHistory, OscalpError> {
        self.histories
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("history script exhausted"))
    }

    fn fetch_quote(&self, _symbol: &str) -> Result<Quote, OscalpError> {
        self.quotes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("quote script exhausted"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCall {
    Buy { notional: f64 },
    Sell { quantity: f64 },
}

/// Order gateway with real account semantics: buys beyond cash and
/// sells beyond holdings are rejected, so the engine's duplicate
/// submissions bounce the way a live gateway would bounce them.
pub struct RecordingOrderPort {
    cash: Cell<f64>,
    holdings: Cell<f64>,
    fill_price: Cell<f64>,
    calls: RefCell<Vec<OrderCall>>,
}

impl RecordingOrderPort {
    pub fn new(cash: f64, fill_price: f64) -> Self {
        Self {
            cash: Cell::new(cash),
            holdings: Cell::new(0.0),
            fill_price: Cell::new(fill_price),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_fill_price(&self, price: f64) {
        self.fill_price.set(price);
    }

    pub fn calls(&self) -> Vec<OrderCall> {
        self.calls.borrow().clone()
    }

    pub fn buy_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, OrderCall::Buy { .. }))
            .count()
    }

    pub fn sell_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, OrderCall::Sell { .. }))
            .count()
    }

    pub fn holdings(&self) -> f64 {
        self.holdings.get()
    }
}

impl OrderPort for RecordingOrderPort {
    fn buy_by_notional(&self, symbol: &str, notional: f64) -> Result<OrderAck, OscalpError> {
        self.calls.borrow_mut().push(OrderCall::Buy { notional });
        if notional <= 0.0 || notional > self.cash.get() {
            return Err(OscalpError::OrderRejected {
                side: oscalp::domain::market::OrderSide::Buy,
                symbol: symbol.to_string(),
                reason: "insufficient funds".to_string(),
            });
        }
        self.cash.set(self.cash.get() - notional);
        self.holdings
            .set(self.holdings.get() + notional / self.fill_price.get());
        Ok(OrderAck { order_id: None })
    }

    fn sell_by_quantity(&self, symbol: &str, quantity: f64) -> Result<OrderAck, OscalpError> {
        self.calls.borrow_mut().push(OrderCall::Sell { quantity });
        if quantity <= 0.0 || quantity > self.holdings.get() {
            return Err(OscalpError::OrderRejected {
                side: oscalp::domain::market::OrderSide::Sell,
                symbol: symbol.to_string(),
                reason: "insufficient holdings".to_string(),
            });
        }
        self.holdings.set(self.holdings.get() - quantity);
        self.cash
            .set(self.cash.get() + quantity * self.fill_price.get());
        Ok(OrderAck { order_id: None })
    }

    fn held_quantity(&self, _symbol: &str) -> Result<f64, OscalpError> {
        Ok(self.holdings.get())
    }

    fn available_cash(&self) -> Result<f64, OscalpError> {
        Ok(self.cash.get())
    }
}

/// Clock that records requested sleeps without blocking.
pub struct TestClock {
    sleeps: RefCell<Vec<Duration>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl ClockPort for TestClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

pub struct RecordingReport {
    events: RefCell<Vec<EngineEvent>>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }
}

impl ReportPort for RecordingReport {
    fn report(&self, event: &EngineEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// History whose every series descends one unit per bar. With a window
/// of 2 the oscillators are exactly 0 on all valid indices, so the
/// synthesized candle sits at 0 and reads as a signal.
pub fn descending_history(bars: usize, last_low: f64) -> OhlcHistory {
    let series = |offset: f64| -> Vec<f64> {
        (0..bars)
            .map(|i| offset + (bars - 1 - i) as f64)
            .collect()
    };
    OhlcHistory {
        open: series(last_low + 0.5),
        high: series(last_low + 1.0),
        low: series(last_low),
        close: series(last_low + 0.75),
    }
}

/// History whose every series ascends, pinning a window-2 oscillator at
/// 100 and keeping the candle far above any oversold threshold.
pub fn ascending_history(bars: usize) -> OhlcHistory {
    let series = |offset: f64| -> Vec<f64> { (0..bars).map(|i| offset + i as f64).collect() };
    OhlcHistory {
        open: series(10.5),
        high: series(11.0),
        low: series(10.0),
        close: series(10.75),
    }
}

/// Green reversal bar for window 2, smoothing 1. The close series turns
/// up on the last bar so the close oscillator reads 0 then 90; with the
/// other series still descending the candle closes at 22.5, green and
/// below a 45 extra-check threshold. The latest raw low is `last_low`.
pub fn green_reversal_history(last_low: f64) -> OhlcHistory {
    OhlcHistory {
        open: vec![13.0, 12.0, 11.0, 10.0],
        high: vec![14.0, 13.0, 12.0, 11.0],
        low: vec![last_low + 3.0, last_low + 2.0, last_low + 1.0, last_low],
        close: vec![12.0, 11.0, 10.0, 19.0],
    }
}

/// Green bar that closes too high. Ascending high and low series pin
/// their oscillators at 100, lifting the candle close to 72.5, which is
/// above a 45 extra-check threshold.
pub fn overheated_reversal_history() -> OhlcHistory {
    OhlcHistory {
        open: vec![13.0, 12.0, 11.0, 10.0],
        high: vec![11.0, 12.0, 13.0, 14.0],
        low: vec![7.0, 8.0, 9.0, 10.0],
        close: vec![12.0, 11.0, 10.0, 19.0],
    }
}
