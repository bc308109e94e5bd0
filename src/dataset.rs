//! Sliding-Window Dataset Construction
//!
//! Turns a scaled price series into supervised samples: each input row is a
//! fixed-length run of consecutive values and the target is the value that
//! immediately follows it.

use ndarray::{Array1, Array2};

/// Build `(X, Y)` from `series` with the given lookback length.
///
/// `X` has shape `(n - lookback, lookback)` and `Y` has shape
/// `(n - lookback,)`; row `i` of `X` is `series[i..i + lookback]` and
/// `Y[i]` is `series[i + lookback]`. When `n <= lookback` both are empty.
/// Trailing values that cannot start a full window are dropped.
pub fn make_windows(series: &[f64], lookback: usize) -> (Array2<f64>, Array1<f64>) {
    let n = series.len();
    if lookback == 0 || n <= lookback {
        return (Array2::zeros((0, lookback)), Array1::zeros(0));
    }

    let samples = n - lookback;
    let mut inputs = Array2::zeros((samples, lookback));
    let mut targets = Array1::zeros(samples);

    for i in 0..samples {
        inputs
            .row_mut(i)
            .assign(&Array1::from_iter(series[i..i + lookback].iter().cloned()));
        targets[i] = series[i + lookback];
    }

    (inputs, targets)
}
