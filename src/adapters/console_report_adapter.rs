//! Console report adapter implementing ReportPort.
//!
//! Renders engine events as timestamped operator lines on stdout, with
//! data failures routed to stderr.

use crate::domain::event::EngineEvent;
use crate::ports::report_port::ReportPort;
use chrono::Local;

pub struct ConsoleReportAdapter;

impl ConsoleReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn render(event: &EngineEvent) -> String {
        match event {
            EngineEvent::PhaseChanged { from, to } => {
                format!("Phase: {:?} -> {:?}", from, to)
            }
            EngineEvent::NoSignal { candle_low } => {
                format!("No signal, candle low {:.4} above oversold threshold", candle_low)
            }
            EngineEvent::SignalDetected {
                candle_low,
                swing_low,
            } => format!(
                "Passed condition 1: candle low {:.4} is oversold, swing low {:.4}",
                candle_low, swing_low
            ),
            EngineEvent::AwaitingReversal => "Waiting on reversal confirmation".to_string(),
            EngineEvent::SwingLowUpdated { swing_low } => {
                format!("Swing low updated to {:.4}", swing_low)
            }
            EngineEvent::SignalInvalidated { candle_close } => format!(
                "Signal invalidated, green candle closed at {:.4} above extra check",
                candle_close
            ),
            EngineEvent::EntryConfirmed { candle_close } => {
                format!("Passed condition 2: green candle closed at {:.4}", candle_close)
            }
            EngineEvent::EntryExecuted {
                mark,
                notional,
                take_profit,
                stop_loss,
            } => format!(
                "Buy order executed at {:.4} for {:.2}. Take profit {:.4}, stop loss {:.4}",
                mark, notional, take_profit, stop_loss
            ),
            EngineEvent::DuplicateRejected { side, reason } => {
                format!("Duplicate {} order rejected: {}", side, reason)
            }
            EngineEvent::MonitoringPrice { price } => {
                format!("Holding, current price {:.4}", price)
            }
            EngineEvent::ProfitExit {
                exit_price,
                quantity,
                pnl_per_unit,
            } => format!(
                "Sell order executed at {:.4} for {:.8} units. Profit per unit: {:.4}",
                exit_price, quantity, pnl_per_unit
            ),
            EngineEvent::LossExit {
                exit_price,
                quantity,
                pnl_per_unit,
            } => format!(
                "Stop loss sell executed at {:.4} for {:.8} units. Loss per unit: {:.4}",
                exit_price, quantity, pnl_per_unit
            ),
            EngineEvent::DataUnavailable { stage, reason } => {
                format!("Data unavailable during {}: {}", stage, reason)
            }
        }
    }
}

impl Default for ConsoleReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for ConsoleReportAdapter {
    fn report(&self, event: &EngineEvent) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = Self::render(event);
        match event {
            EngineEvent::DataUnavailable { .. } => eprintln!("[{}] {}", timestamp, line),
            _ => println!("[{}] {}", timestamp, line),
        }
    }
}
