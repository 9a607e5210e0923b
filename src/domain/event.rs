//! Typed engine events for operator reporting.
//!
//! The engine narrates every decision through these; adapters decide how
//! to render them. Keeping the variants data-only means tests can assert
//! on exact transition sequences.

use crate::domain::engine::Phase;
use crate::domain::market::OrderSide;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineEvent {
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    /// Candle low stayed above the oversold threshold this cycle.
    NoSignal {
        candle_low: f64,
    },
    /// Candle low crossed below the oversold threshold; watching begins.
    SignalDetected {
        candle_low: f64,
        swing_low: f64,
    },
    AwaitingReversal,
    /// A lower raw low was observed while waiting for the reversal.
    SwingLowUpdated {
        swing_low: f64,
    },
    /// Green reversal bar closed at or above the extra-check threshold;
    /// the setup is discarded.
    SignalInvalidated {
        candle_close: f64,
    },
    EntryConfirmed {
        candle_close: f64,
    },
    EntryExecuted {
        mark: f64,
        notional: f64,
        take_profit: f64,
        stop_loss: f64,
    },
    /// The deliberate second submission was rejected, as expected when
    /// the first one filled for the full balance.
    DuplicateRejected {
        side: OrderSide,
        reason: String,
    },
    MonitoringPrice {
        price: f64,
    },
    ProfitExit {
        exit_price: f64,
        quantity: f64,
        pnl_per_unit: f64,
    },
    LossExit {
        exit_price: f64,
        quantity: f64,
        pnl_per_unit: f64,
    },
    /// Recoverable data failure; the affected cycle is skipped.
    DataUnavailable {
        stage: &'static str,
        reason: String,
    },
}
