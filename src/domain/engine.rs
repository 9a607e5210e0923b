//! Strategy state machine.
//!
//! One engine instance per symbol, single-threaded, no shared state.
//! A full cycle runs Idle -> Watching -> Confirmed -> Monitoring -> Idle
//! inside one `evaluate` call; the driver re-invokes it every poll
//! interval with fresh available capital. All timing lives here, every
//! wait going through the clock port.
//!
//! Failure policy: market-data errors are reported and the cycle (or
//! inner wait) skipped; a first order submission failing is fatal and
//! propagates to the driver. The deliberate second submission on entry
//! and profit exit is allowed to be rejected: the first fill commits
//! the whole balance, so the duplicate bounces off the gateway instead
//! of double-filling.

use std::time::Duration;

use crate::domain::error::OscalpError;
use crate::domain::event::EngineEvent;
use crate::domain::indicator::{candle_from_history, SynthCandle};
use crate::domain::market::OrderSide;
use crate::domain::position::{EntryLevels, Position};
use crate::ports::clock_port::ClockPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::order_port::OrderPort;
use crate::ports::report_port::ReportPort;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Watching,
    Confirmed,
    Monitoring,
}

/// Outcome of one driver-visible evaluation cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Candle low never crossed the oversold threshold.
    NoSignal,
    /// A recoverable data failure made this cycle unusable.
    Skipped,
    /// The reversal bar was green but closed above the extra-check
    /// threshold; the setup was discarded.
    Invalidated,
    ExitedProfit { exit_price: f64, pnl_per_unit: f64 },
    ExitedLoss { exit_price: f64, pnl_per_unit: f64 },
}

/// Tunables for the indicator engine and the state machine. Passed in
/// explicitly so tests can shrink windows and intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub window: usize,
    pub smoothing: usize,
    pub oversold: f64,
    pub extra_check: f64,
    pub profit_pct: f64,
    pub confirm_interval: Duration,
    pub exit_poll_interval: Duration,
    pub settle_delay: Duration,
    pub interval: String,
    pub span: String,
    pub bounds: String,
    /// Cap on consecutive data failures inside the watching and
    /// monitoring waits. `None` retries forever, which is right for a
    /// live gateway; a driver on a bounded source (replay) sets a cap
    /// so `evaluate` returns `Skipped` instead of spinning on a feed
    /// that will never recover.
    pub max_data_failures: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            window: 14,
            smoothing: 1,
            oversold: 30.0,
            extra_check: 45.0,
            profit_pct: 0.25,
            confirm_interval: Duration::from_secs(300),
            exit_poll_interval: Duration::from_secs(30),
            settle_delay: Duration::from_secs(15),
            interval: "5minute".into(),
            span: "day".into(),
            bounds: "24_7".into(),
            max_data_failures: None,
        }
    }
}

pub struct StrategyEngine<'a> {
    symbol: String,
    config: EngineConfig,
    data: &'a dyn MarketDataPort,
    orders: &'a dyn OrderPort,
    clock: &'a dyn ClockPort,
    report: &'a dyn ReportPort,
    phase: Phase,
}

impl<'a> StrategyEngine<'a> {
    pub fn new(
        symbol: impl Into<String>,
        config: EngineConfig,
        data: &'a dyn MarketDataPort,
        orders: &'a dyn OrderPort,
        clock: &'a dyn ClockPort,
        report: &'a dyn ReportPort,
    ) -> Self {
        StrategyEngine {
            symbol: symbol.into(),
            config,
            data,
            orders,
            clock,
            report,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn set_phase(&mut self, to: Phase) {
        if self.phase != to {
            self.report.report(&EngineEvent::PhaseChanged {
                from: self.phase,
                to,
            });
            self.phase = to;
        }
    }

    fn data_failures_exceeded(&self, failures: u32) -> bool {
        self.config
            .max_data_failures
            .is_some_and(|cap| failures >= cap)
    }

    /// Minimum bars for one synthesized candle: warm-up plus the two
    /// completed bars the synthesis indexes.
    fn min_history(&self) -> usize {
        self.config.window + 2
    }

    /// Fetch history and synthesize the current candle, also returning
    /// the latest raw low for swing tracking.
    fn fetch_candle(&self) -> Result<(SynthCandle, f64), OscalpError> {
        let history = self.data.fetch_ohlc(
            &self.symbol,
            &self.config.interval,
            &self.config.span,
            &self.config.bounds,
        )?;

        if !history.is_aligned() {
            return Err(OscalpError::MarketData {
                symbol: self.symbol.clone(),
                reason: "misaligned OHLC series".into(),
            });
        }
        if history.len() < self.min_history() {
            return Err(OscalpError::InsufficientHistory {
                symbol: self.symbol.clone(),
                bars: history.len(),
                minimum: self.min_history(),
            });
        }

        let candle = candle_from_history(&history, self.config.window, self.config.smoothing);
        let raw_low = history.latest_low().unwrap_or(f64::NAN);
        Ok((candle, raw_low))
    }

    /// Run one evaluation cycle with the capital the driver made
    /// available. Returns `Err` only for fatal order failures.
    pub fn evaluate(&mut self, available_capital: f64) -> Result<CycleOutcome, OscalpError> {
        let (candle, raw_low) = match self.fetch_candle() {
            Ok(v) => v,
            Err(e) => {
                self.report.report(&EngineEvent::DataUnavailable {
                    stage: "history",
                    reason: e.to_string(),
                });
                return Ok(CycleOutcome::Skipped);
            }
        };

        if !(candle.low < self.config.oversold) {
            self.report.report(&EngineEvent::NoSignal {
                candle_low: candle.low,
            });
            return Ok(CycleOutcome::NoSignal);
        }

        self.set_phase(Phase::Watching);
        let mut swing_low = raw_low;
        self.report.report(&EngineEvent::SignalDetected {
            candle_low: candle.low,
            swing_low,
        });

        // Wait for the green reversal bar, tracking the running swing
        // low on every red bar in between.
        let mut failures = 0u32;
        loop {
            self.report.report(&EngineEvent::AwaitingReversal);
            self.clock.sleep(self.config.confirm_interval);

            let (candle, raw_low) = match self.fetch_candle() {
                Ok(v) => {
                    failures = 0;
                    v
                }
                Err(e) => {
                    self.report.report(&EngineEvent::DataUnavailable {
                        stage: "history",
                        reason: e.to_string(),
                    });
                    failures += 1;
                    if self.data_failures_exceeded(failures) {
                        self.set_phase(Phase::Idle);
                        return Ok(CycleOutcome::Skipped);
                    }
                    continue;
                }
            };

            if candle.is_green() {
                if candle.close < self.config.extra_check {
                    self.report.report(&EngineEvent::EntryConfirmed {
                        candle_close: candle.close,
                    });
                    self.set_phase(Phase::Confirmed);
                    break;
                }
                // Momentum already ran; the whole setup is discarded,
                // swing-low tracking included.
                self.report.report(&EngineEvent::SignalInvalidated {
                    candle_close: candle.close,
                });
                self.set_phase(Phase::Idle);
                return Ok(CycleOutcome::Invalidated);
            }

            if raw_low < swing_low {
                swing_low = raw_low;
                self.report.report(&EngineEvent::SwingLowUpdated { swing_low });
            }
        }

        let quote = match self.data.fetch_quote(&self.symbol) {
            Ok(q) => q,
            Err(e) => {
                // Never trade on absent data: abandon the setup rather
                // than enter at an unknown price.
                self.report.report(&EngineEvent::DataUnavailable {
                    stage: "quote",
                    reason: e.to_string(),
                });
                self.set_phase(Phase::Idle);
                return Ok(CycleOutcome::Skipped);
            }
        };

        let levels = EntryLevels::compute(&quote, swing_low, self.config.profit_pct);

        self.orders
            .buy_by_notional(&self.symbol, available_capital)?;
        self.clock.sleep(self.config.settle_delay);
        if let Err(e) = self.orders.buy_by_notional(&self.symbol, available_capital) {
            self.report.report(&EngineEvent::DuplicateRejected {
                side: OrderSide::Buy,
                reason: e.to_string(),
            });
        }

        let position = Position::open(quote.mark, &levels, swing_low);
        self.set_phase(Phase::Monitoring);
        self.report.report(&EngineEvent::EntryExecuted {
            mark: quote.mark,
            notional: available_capital,
            take_profit: position.take_profit,
            stop_loss: position.stop_loss,
        });

        self.monitor_exit(position)
    }

    /// Poll a freshly fetched price until one of the exit thresholds is
    /// crossed. Returns through an exit, a fatal order error, or the
    /// consecutive-failure cap.
    fn monitor_exit(&mut self, position: Position) -> Result<CycleOutcome, OscalpError> {
        let mut failures = 0u32;
        loop {
            self.clock.sleep(self.config.exit_poll_interval);

            let quote = match self.data.fetch_quote(&self.symbol) {
                Ok(q) => {
                    failures = 0;
                    q
                }
                Err(e) => {
                    self.report.report(&EngineEvent::DataUnavailable {
                        stage: "quote",
                        reason: e.to_string(),
                    });
                    failures += 1;
                    if self.data_failures_exceeded(failures) {
                        // The position stays open; a feed that stopped
                        // answering has no price to close it against.
                        self.set_phase(Phase::Idle);
                        return Ok(CycleOutcome::Skipped);
                    }
                    continue;
                }
            };
            let price = quote.mark;

            if position.should_take_profit(price) {
                let quantity = self.orders.held_quantity(&self.symbol)?;
                self.orders.sell_by_quantity(&self.symbol, quantity)?;
                self.clock.sleep(self.config.settle_delay);
                if let Err(e) = self.orders.sell_by_quantity(&self.symbol, quantity) {
                    self.report.report(&EngineEvent::DuplicateRejected {
                        side: OrderSide::Sell,
                        reason: e.to_string(),
                    });
                }

                let pnl = position.unrealized_pnl(price);
                self.set_phase(Phase::Idle);
                self.report.report(&EngineEvent::ProfitExit {
                    exit_price: price,
                    quantity,
                    pnl_per_unit: pnl,
                });
                return Ok(CycleOutcome::ExitedProfit {
                    exit_price: price,
                    pnl_per_unit: pnl,
                });
            }

            if position.should_stop_loss(price) {
                // Loss exits are time-critical: a single submission, so a
                // rejected duplicate can never delay the close.
                let quantity = self.orders.held_quantity(&self.symbol)?;
                self.orders.sell_by_quantity(&self.symbol, quantity)?;

                let pnl = position.unrealized_pnl(price);
                self.set_phase(Phase::Idle);
                self.report.report(&EngineEvent::LossExit {
                    exit_price: price,
                    quantity,
                    pnl_per_unit: pnl,
                });
                return Ok(CycleOutcome::ExitedLoss {
                    exit_price: price,
                    pnl_per_unit: pnl,
                });
            }

            self.report.report(&EngineEvent::MonitoringPrice { price });
        }
    }
}
