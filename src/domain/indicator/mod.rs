//! Indicator engine: smoothed momentum oscillators and candle synthesis.
//!
//! Pure functions only. Each evaluation cycle feeds a fresh history in
//! and gets a fresh candle out; nothing here holds state between calls.

pub mod heikin_ashi;
pub mod rsi;

use serde::Serialize;

/// One synthesized candle in oscillator space. Ephemeral: recomputed
/// every cycle, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SynthCandle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl SynthCandle {
    /// A green (reversal) candle closes above its open.
    pub fn is_green(&self) -> bool {
        self.close > self.open
    }
}

/// Compute the four oscillator series and synthesize the current candle.
///
/// Callers must have verified alignment and minimum length (window + 2);
/// see the engine's history guard.
pub fn candle_from_history(
    history: &crate::domain::market::OhlcHistory,
    window: usize,
    smoothing: usize,
) -> SynthCandle {
    let open_osc = rsi::wilder_rsi(&history.open, window);
    let high_osc = rsi::wilder_rsi(&history.high, window);
    let low_osc = rsi::wilder_rsi(&history.low, window);
    let close_osc = rsi::wilder_rsi(&history.close, window);
    heikin_ashi::synthesize_candle(&open_osc, &high_osc, &low_osc, &close_osc, smoothing)
}
