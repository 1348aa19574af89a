//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses sample stddev (divide by N - 1).

use super::{ensure_len, finite, sma_at};
use crate::ComputationError;

#[derive(Debug, Clone)]
pub struct BollingerIndicator {
    pub period: usize,
    pub multiplier: f64,
}

/// Band levels on the latest bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// True when the window had zero variance and the bands collapsed.
    pub fn is_degenerate(&self) -> bool {
        self.upper == self.lower
    }

    /// Where `price` sits between the bands: 0 at lower, 1 at upper.
    /// Returns `None` for collapsed bands.
    pub fn position(&self, price: f64) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        Some((price - self.lower) / (self.upper - self.lower))
    }

    /// Band spread relative to the middle band.
    pub fn width(&self) -> f64 {
        (self.upper - self.lower) / self.middle
    }
}

impl BollingerIndicator {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        assert!(multiplier > 0.0, "Bollinger multiplier must be > 0");
        Self { period, multiplier }
    }

    pub fn min_len(&self) -> usize {
        self.period
    }

    pub fn compute(&self, closes: &[f64]) -> Result<BollingerBands, ComputationError> {
        ensure_len(closes.len(), self.min_len())?;

        let end = closes.len() - 1;
        let middle = finite(sma_at(closes, end, self.period), "Bollinger middle band")?;
        let window = &closes[closes.len() - self.period..];
        let variance = window.iter().map(|c| (c - middle).powi(2)).sum::<f64>()
            / (self.period - 1) as f64;
        let std_dev = finite(variance.sqrt(), "Bollinger standard deviation")?;

        Ok(BollingerBands {
            upper: middle + self.multiplier * std_dev,
            middle,
            lower: middle - self.multiplier * std_dev,
        })
    }
}
