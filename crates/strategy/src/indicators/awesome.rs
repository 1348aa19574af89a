//! Awesome Oscillator: SMA(fast) − SMA(slow) of the bar midpoint (high+low)/2.

use super::{ensure_len, finite, sma_at};
use crate::ComputationError;

#[derive(Debug, Clone)]
pub struct AwesomeOscillator {
    pub fast: usize,
    pub slow: usize,
}

/// The last three oscillator values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoReading {
    pub current: f64,
    pub previous: f64,
    pub before_previous: f64,
}

impl AwesomeOscillator {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1, "AO fast period must be >= 1");
        assert!(fast < slow, "AO fast period must be less than slow period");
        Self { fast, slow }
    }

    pub fn default_params() -> Self {
        Self::new(5, 34)
    }

    /// One slow window plus three bars of lookback.
    pub fn min_len(&self) -> usize {
        self.slow + 3
    }

    pub fn compute(&self, highs: &[f64], lows: &[f64]) -> Result<AoReading, ComputationError> {
        let n = highs.len().min(lows.len());
        ensure_len(n, self.min_len())?;

        let midpoints: Vec<f64> = highs[..n]
            .iter()
            .zip(&lows[..n])
            .map(|(h, l)| (h + l) / 2.0)
            .collect();

        let ao_at = |end: usize| {
            finite(
                sma_at(&midpoints, end, self.fast) - sma_at(&midpoints, end, self.slow),
                "awesome oscillator",
            )
        };

        Ok(AoReading {
            current: ao_at(n - 1)?,
            previous: ao_at(n - 2)?,
            before_previous: ao_at(n - 3)?,
        })
    }
}
