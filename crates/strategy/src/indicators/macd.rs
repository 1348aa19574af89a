use super::{ema_series, ensure_len, finite};
use crate::ComputationError;

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// Computes: MACD line = EMA(fast) − EMA(slow), Signal = EMA(macd_line, signal_period),
/// Histogram = MACD − Signal. Reports the last two samples so callers can detect
/// a crossover on the latest bar.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// Latest and previous MACD/signal samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub prev_macd: f64,
    pub prev_signal: f64,
}

impl MacdReading {
    /// MACD crossed above the signal line on the latest bar.
    pub fn crossed_up(&self) -> bool {
        self.prev_macd <= self.prev_signal && self.macd > self.signal
    }

    /// MACD crossed below the signal line on the latest bar.
    pub fn crossed_down(&self) -> bool {
        self.prev_macd >= self.prev_signal && self.macd < self.signal
    }
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be less than slow period");
        Self { fast, slow, signal }
    }

    /// Minimum number of closes: one full slow window.
    pub fn min_len(&self) -> usize {
        self.slow
    }

    /// Compute the MACD reading from close prices (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Result<MacdReading, ComputationError> {
        ensure_len(closes.len(), self.min_len())?;

        let fast = ema_series(closes, self.fast);
        let slow = ema_series(closes, self.slow);
        let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = ema_series(&macd_line, self.signal);

        let n = macd_line.len();
        let macd = finite(macd_line[n - 1], "MACD line")?;
        let signal = finite(signal_line[n - 1], "MACD signal line")?;

        Ok(MacdReading {
            macd,
            signal,
            histogram: macd - signal,
            prev_macd: finite(macd_line[n - 2], "MACD line")?,
            prev_signal: finite(signal_line[n - 2], "MACD signal line")?,
        })
    }
}
