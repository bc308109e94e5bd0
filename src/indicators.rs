//! Moving Averages
//!
//! Trailing simple moving averages reported per symbol. The training path
//! never consumes these values; they are logged for inspection only.

/// Trailing simple moving average.
///
/// The first `period - 1` positions have no full window and are NaN,
/// matching a rolling mean over trailing values.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![f64::NAN; values.len()];
    }

    let mut result = vec![f64::NAN; period - 1];
    let mut window_sum: f64 = values[..period].iter().sum();
    result.push(window_sum / period as f64);

    for i in period..values.len() {
        window_sum += values[i] - values[i - period];
        result.push(window_sum / period as f64);
    }

    result
}

/// Most recent moving-average value, if the series is long enough.
pub fn latest_sma(values: &[f64], period: usize) -> Option<f64> {
    sma(values, period).last().copied().filter(|v| v.is_finite())
}
