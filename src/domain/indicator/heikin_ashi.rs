//! Heikin-Ashi candle synthesis over oscillator series.
//!
//! A single noise-reduced candle is derived from the four smoothed
//! oscillator series (one per OHLC field). Unlike raw prices, the
//! oscillator "high" and "low" can overlap, so the range is re-sorted
//! before use.

use crate::domain::indicator::SynthCandle;

/// Synthesize the current candle from four aligned oscillator series.
///
/// Callers must provide series of length >= 2; values still inside the
/// oscillator warm-up are NaN and propagate into the candle, which is
/// why the engine guards history length before calling this.
///
/// - close: mean of the previous close-oscillator (stands in for the
///   still-forming bar's open), the re-sorted latest range, and the
///   latest close-oscillator.
/// - open: weighted blend of the previous open- and close-oscillator,
///   falling back to their plain average while the value at index
///   `smoothing` is still warming up.
/// - high/low: clamped so the candle always bounds its own open/close.
pub fn synthesize_candle(
    open_osc: &[f64],
    high_osc: &[f64],
    low_osc: &[f64],
    close_osc: &[f64],
    smoothing: usize,
) -> SynthCandle {
    let n = close_osc.len();
    debug_assert!(n >= 2);
    debug_assert!(open_osc.len() == n && high_osc.len() == n && low_osc.len() == n);

    let prev_open = open_osc[n - 2];
    let prev_close = close_osc[n - 2];
    let latest_close = close_osc[n - 1];

    let range_high = high_osc[n - 1].max(low_osc[n - 1]);
    let range_low = high_osc[n - 1].min(low_osc[n - 1]);

    let close = (prev_close + range_high + range_low + latest_close) / 4.0;

    let smoothing_seed = open_osc.get(smoothing).copied().unwrap_or(f64::NAN);
    let open = if smoothing_seed.is_nan() {
        (prev_open + prev_close) / 2.0
    } else {
        (prev_open * smoothing as f64 + prev_close) / (smoothing as f64 + 1.0)
    };

    let high = range_high.max(open.max(close));
    let low = range_low.min(open.min(close));

    SynthCandle {
        open,
        high,
        low,
        close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn close_averages_prev_close_range_and_latest() {
        // NaN at index `smoothing` forces the fallback open.
        let open_osc = [f64::NAN, f64::NAN, 40.0, 44.0];
        let high_osc = [f64::NAN, f64::NAN, 70.0, 60.0];
        let low_osc = [f64::NAN, f64::NAN, 30.0, 80.0];
        let close_osc = [f64::NAN, f64::NAN, 48.0, 52.0];

        let candle = synthesize_candle(&open_osc, &high_osc, &low_osc, &close_osc, 1);

        // Range re-sorted: high 80, low 60.
        assert_relative_eq!(candle.close, (48.0 + 80.0 + 60.0 + 52.0) / 4.0);
        // Fallback open: (40 + 48) / 2.
        assert_relative_eq!(candle.open, 44.0);
    }

    #[test]
    fn weighted_open_when_seed_is_warm() {
        let open_osc = [50.0, 52.0, 40.0, 44.0];
        let high_osc = [50.0, 52.0, 70.0, 60.0];
        let low_osc = [50.0, 52.0, 30.0, 55.0];
        let close_osc = [50.0, 52.0, 48.0, 52.0];

        let candle = synthesize_candle(&open_osc, &high_osc, &low_osc, &close_osc, 2);

        // index 2 is finite, so open = (prev_open * 2 + prev_close) / 3
        assert_relative_eq!(candle.open, (40.0 * 2.0 + 48.0) / 3.0);
    }

    #[test]
    fn high_low_bound_open_and_close() {
        let open_osc = [f64::NAN, f64::NAN, 90.0, 10.0];
        let high_osc = [f64::NAN, f64::NAN, 40.0, 42.0];
        let low_osc = [f64::NAN, f64::NAN, 38.0, 41.0];
        let close_osc = [f64::NAN, f64::NAN, 95.0, 5.0];

        let candle = synthesize_candle(&open_osc, &high_osc, &low_osc, &close_osc, 1);

        assert!(candle.high >= candle.open.max(candle.close));
        assert!(candle.low <= candle.open.min(candle.close));
    }

    #[test]
    fn overlapping_range_is_resorted() {
        // Oscillator "low" above oscillator "high".
        let open_osc = [f64::NAN, f64::NAN, 50.0, 50.0];
        let high_osc = [f64::NAN, f64::NAN, 50.0, 45.0];
        let low_osc = [f64::NAN, f64::NAN, 50.0, 65.0];
        let close_osc = [f64::NAN, f64::NAN, 50.0, 50.0];

        let candle = synthesize_candle(&open_osc, &high_osc, &low_osc, &close_osc, 1);

        assert!(candle.high >= 65.0);
        assert!(candle.low <= 50.0);
    }

    #[test]
    fn smoothing_beyond_length_uses_fallback() {
        let series = [50.0, 55.0];
        let candle = synthesize_candle(&series, &series, &series, &series, 10);
        assert_relative_eq!(candle.open, 50.0);
    }

    #[test]
    fn green_candle_detection() {
        let candle = SynthCandle {
            open: 20.0,
            high: 50.0,
            low: 10.0,
            close: 40.0,
        };
        assert!(candle.is_green());

        let red = SynthCandle {
            open: 40.0,
            high: 50.0,
            low: 10.0,
            close: 20.0,
        };
        assert!(!red.is_green());
    }
}
