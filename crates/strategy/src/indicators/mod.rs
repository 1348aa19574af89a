//! Numeric indicator kernels.
//!
//! Each indicator validates its minimum input length up front and returns
//! `ComputationError::InsufficientData` instead of computing on undefined
//! warm-up values. Inputs are oldest-first slices.

pub mod awesome;
pub mod bollinger;
pub mod macd;
pub mod parabolic_sar;
pub mod rsi;

pub use awesome::{AoReading, AwesomeOscillator};
pub use bollinger::{BollingerBands, BollingerIndicator};
pub use macd::{MacdIndicator, MacdReading};
pub use parabolic_sar::{ParabolicSar, SarPoint};
pub use rsi::RsiIndicator;

use crate::ComputationError;

/// Fail with `InsufficientData` when fewer than `required` values are present.
pub(crate) fn ensure_len(available: usize, required: usize) -> Result<(), ComputationError> {
    if available < required {
        return Err(ComputationError::InsufficientData { required, available });
    }
    Ok(())
}

/// Pass `value` through, or fail with `NonFinite(what)` for NaN/inf.
pub(crate) fn finite(value: f64, what: &'static str) -> Result<f64, ComputationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFinite(what))
    }
}

/// Simple moving average of the `period` values ending at index `end` (inclusive).
pub(crate) fn sma_at(data: &[f64], end: usize, period: usize) -> f64 {
    let start = end + 1 - period;
    data[start..=end].iter().sum::<f64>() / period as f64
}

/// Span-based exponential moving average over the whole slice.
///
/// Uses α = 2 / (span + 1) with bias-adjusted weights from the first value,
/// i.e. each output is Σ (1-α)^i · x[t-i] / Σ (1-α)^i. This is the weighting a
/// dataframe `ewm(span).mean()` produces, so the line is defined from bar 0.
pub(crate) fn ema_series(data: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut num = 0.0;
    let mut den = 0.0;
    data.iter()
        .map(|&x| {
            num = x + decay * num;
            den = 1.0 + decay * den;
            num / den
        })
        .collect()
}

/// Round half away from zero to `places` decimals, for display fields.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
