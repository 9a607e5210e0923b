//! Wilder-smoothed RSI oscillator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: indices 0..window are NaN (a change series of n samples is
//! needed before the first average exists).

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split a price series into per-bar gain and loss magnitudes, each
/// rounded to 2 decimal places. `gains[i]` and `losses[i]` correspond to
/// the change from `series[i]` to `series[i + 1]`; at most one of the
/// pair is non-zero.
pub fn split_changes(series: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(series.len().saturating_sub(1));
    let mut losses = Vec::with_capacity(series.len().saturating_sub(1));
    for pair in series.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(round2(delta.max(0.0)));
        losses.push(round2((-delta).max(0.0)));
    }
    (gains, losses)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
}

/// Compute the smoothed oscillator for a price series.
///
/// The output has the same length as the input. Indices below `window`
/// are NaN. Each value is causal: it depends only on samples at or
/// before its own index. The recurrence is evaluated strictly
/// left-to-right; every call builds a fresh output with no carried
/// state, so recomputation over the same input is bit-identical.
pub fn wilder_rsi(series: &[f64], window: usize) -> Vec<f64> {
    let n = series.len();
    if window == 0 || n < window + 1 {
        return vec![f64::NAN; n];
    }

    let (gains, losses) = split_changes(series);

    let mut out = vec![f64::NAN; n];

    // Seed: simple mean of the first `window` changes.
    let mut avg_gain = gains[..window].iter().sum::<f64>() / window as f64;
    let mut avg_loss = losses[..window].iter().sum::<f64>() / window as f64;
    out[window] = rsi_value(avg_gain, avg_loss);

    for i in window + 1..n {
        avg_gain = (avg_gain * (window as f64 - 1.0) + gains[i - 1]) / window as f64;
        avg_loss = (avg_loss * (window as f64 - 1.0) + losses[i - 1]) / window as f64;
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    out
}
